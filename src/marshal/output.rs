use super::Value;

/// Accumulates the values produced by "native to managed" conversions of one call.
///
/// Converters always push. [Output::into_value] gives the result the shape expected on the managed side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    values: Vec<Value>,
}

impl Output {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one converted value.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Number of appended values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Reports whether nothing was appended.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appended values in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Collapses the accumulator: nothing is `None`, a single value is returned as is and more values form a list.
    pub fn into_value(mut self) -> Value {
        match self.values.len() {
            0 => Value::None,
            1 => self.values.pop().unwrap_or_default(),
            _ => Value::List(self.values),
        }
    }
}

impl Extend<Value> for Output {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

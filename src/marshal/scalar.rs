use pcsc_ffi_types::{Dword, Long, ScardContext, ScardHandle};

use super::{AppendTo, FromValue, Output, Value};
use crate::{Error, ErrorKind, ScardResult};

macro_rules! scalar {
    ($(#[$meta:meta])* $name:ident($native:ty, $twin:ty) as $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub $native);

        impl FromValue for $name {
            fn from_value(value: &Value) -> ScardResult<Self> {
                let value = value
                    .as_int()
                    .ok_or_else(|| Error::type_error(concat!("expected an integer as ", $type_name)))?;

                // Both the signed and the unsigned range of the native width are accepted.
                <$native>::try_from(value)
                    .ok()
                    .or_else(|| <$twin>::try_from(value).ok().map(|twin| twin as $native))
                    .map($name)
                    .ok_or_else(|| {
                        Error::new(
                            ErrorKind::Overflow,
                            format!(concat!("integer out of range for ", $type_name, ": {}"), value),
                        )
                    })
            }
        }

        impl AppendTo for $name {
            fn append_to(&self, output: &mut Output) {
                output.push(Value::Int(self.0 as i128));
            }
        }

        impl From<$native> for $name {
            fn from(value: $native) -> Self {
                Self(value)
            }
        }
    };
}

#[cfg(windows)]
type ContextTwin = isize;
#[cfg(not(windows))]
type ContextTwin = Dword;

scalar! {
    /// `SCARDCONTEXT`.
    Context(ScardContext, ContextTwin) as "SCARDCONTEXT"
}

scalar! {
    /// `SCARDHANDLE`.
    Handle(ScardHandle, ContextTwin) as "SCARDHANDLE"
}

scalar! {
    /// `DWORD` argument: flags, timeouts, protocols, attribute ids.
    DwordArg(Dword, Long) as "DWORD"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_signed_and_unsigned_ranges() {
        let dword = DwordArg::from_value(&Value::Int(-1)).unwrap();
        assert_eq!(dword.0, Dword::MAX);

        let dword = DwordArg::from_value(&Value::Int(Dword::MAX.into())).unwrap();
        assert_eq!(dword.0, Dword::MAX);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let error = Context::from_value(&Value::Int(i128::MAX)).unwrap_err();

        assert_eq!(error.error_kind, ErrorKind::Overflow);
    }

    #[test]
    fn rejects_non_integers() {
        let error = Handle::from_value(&Value::from("1")).unwrap_err();

        assert_eq!(error.description, "expected an integer as SCARDHANDLE");
    }

    #[test]
    fn round_trips_through_the_managed_value() {
        let context = Context::from_value(&Value::Int(0x0100_0002)).unwrap();

        assert_eq!(context.to_value(), Value::Int(0x0100_0002));
    }
}

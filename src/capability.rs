use crate::errors::ClientError;

/// A browser capability as seen by the client: present and usable, absent from
/// this browser, or present but refused by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
    PermissionDenied,
}

impl<T> Capability<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Capability::Available(v),
            None => Capability::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Capability::Available(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the capability, naming it in the error when it cannot be used.
    pub fn require(&self, name: &str) -> Result<&T, ClientError> {
        match self {
            Capability::Available(v) => Ok(v),
            Capability::Unavailable => Err(ClientError::unsupported(name)),
            Capability::PermissionDenied => Err(ClientError::denied(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn require_maps_variants_to_errors() {
        let ok: Capability<u8> = Capability::Available(1);
        assert_eq!(ok.require("Clipboard"), Ok(&1));

        let missing: Capability<u8> = Capability::Unavailable;
        assert_eq!(
            missing.require("Clipboard"),
            Err(ClientError::unsupported("Clipboard"))
        );

        let denied: Capability<u8> = Capability::PermissionDenied;
        assert!(denied.require("Microphone").unwrap_err().is_permission_denied());
    }

    #[test]
    fn from_option_wraps_presence() {
        let cap = Capability::from_option(Some(20));
        assert_eq!(cap.available(), Some(&20));
        assert!(!Capability::<u8>::from_option(None).is_available());
    }
}

//! Frame descriptor decoding.
//!
//! A descriptor looks like `java.util.concurrent.ThreadPoolExecutor#runWorker(Worker)`:
//! everything before the last `#` is the fully-qualified class, everything
//! after it is the method signature.

use crate::utils::error::DecodeError;
use serde::{Deserialize, Serialize};

/// Structured view of one stack frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodedFrame {
    /// Original descriptor, used as a stable key
    pub id: String,

    /// Dotted package name (e.g. "java.util.concurrent")
    pub package: String,

    /// Simple class name
    pub class: String,

    /// Method name without arguments
    pub method: String,
}

impl DecodedFrame {
    /// Fully-qualified class name (`package.Class`)
    pub fn qualified_class(&self) -> String {
        format!("{}.{}", self.package, self.class)
    }
}

/// Decode one raw frame descriptor
///
/// **Public** - main entry point for frame decoding
///
/// # Errors
/// * `DecodeError::MissingMethodSeparator` - no `#` in the descriptor
/// * `DecodeError::DefaultPackage` - class is not package-qualified
pub fn decode_frame(descriptor: &str) -> Result<DecodedFrame, DecodeError> {
    let (fqcn, signature) =
        descriptor
            .rsplit_once('#')
            .ok_or_else(|| DecodeError::MissingMethodSeparator {
                frame: descriptor.to_string(),
            })?;

    let (package, class) = fqcn
        .rsplit_once('.')
        .filter(|(package, class)| !package.is_empty() && !class.is_empty())
        .ok_or_else(|| DecodeError::DefaultPackage {
            frame: descriptor.to_string(),
        })?;

    let method = signature
        .split_once('(')
        .map_or(signature, |(name, _)| name);

    Ok(DecodedFrame {
        id: descriptor.to_string(),
        package: package.to_string(),
        class: class.to_string(),
        method: method.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_frame_basic() {
        let frame = decode_frame("com.foo.Bar#baz()V").unwrap();
        assert_eq!(frame.package, "com.foo");
        assert_eq!(frame.class, "Bar");
        assert_eq!(frame.method, "baz");
        assert_eq!(frame.id, "com.foo.Bar#baz()V");
    }

    #[test]
    fn test_decode_frame_inner_class() {
        let frame = decode_frame("java.util.HashMap$Node#getKey()").unwrap();
        assert_eq!(frame.package, "java.util");
        assert_eq!(frame.class, "HashMap$Node");
        assert_eq!(frame.qualified_class(), "java.util.HashMap$Node");
    }

    #[test]
    fn test_decode_frame_without_args() {
        let frame = decode_frame("a.b.C#run").unwrap();
        assert_eq!(frame.method, "run");
    }

    #[test]
    fn test_decode_frame_args_with_dots() {
        let frame = decode_frame("a.b.C#put(java.lang.Object, java.lang.Object)").unwrap();
        assert_eq!(frame.package, "a.b");
        assert_eq!(frame.method, "put");
    }

    #[test]
    fn test_decode_frame_missing_hash() {
        let err = decode_frame("com.foo.Bar.baz()").unwrap_err();
        assert!(matches!(err, DecodeError::MissingMethodSeparator { .. }));
        assert_eq!(err.frame(), "com.foo.Bar.baz()");
    }

    #[test]
    fn test_decode_frame_default_package() {
        let err = decode_frame("Main#main(String[])").unwrap_err();
        assert!(matches!(err, DecodeError::DefaultPackage { .. }));
    }

    #[test]
    fn test_decode_frame_empty_package_segment() {
        assert!(decode_frame(".Main#main()").is_err());
        assert!(decode_frame("com.foo.#main()").is_err());
    }
}

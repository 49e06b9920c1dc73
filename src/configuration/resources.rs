use tracing::trace;

use crate::platform::PlatformDirectories;


/// Prefix marking a value as a resource inside the platform data directory.
pub const DEFAULT_RESOURCE_SCHEME: &str = "default://";


/// Maps `default://<name>` values to files in the platform data directory.
///
/// Purely a string transformation: whether the resulting file exists
/// is only discovered when someone opens it.
#[derive(Debug, Clone, Copy)]
pub struct ResourceResolver<'p> {
    platform: &'p dyn PlatformDirectories,
}

impl<'p> ResourceResolver<'p> {
    pub fn new(platform: &'p dyn PlatformDirectories) -> Self {
        Self { platform }
    }

    /// Resolves `value` if it uses the [`DEFAULT_RESOURCE_SCHEME`],
    /// otherwise returns it unchanged.
    pub fn resolve(&self, value: &str) -> String {
        match value.strip_prefix(DEFAULT_RESOURCE_SCHEME) {
            Some(resource_name) => {
                let resolved = self.platform.data_file(resource_name);
                trace!(
                    "Resolved resource {} to {}.",
                    value,
                    resolved.display()
                );

                resolved.to_string_lossy().to_string()
            }
            None => value.to_string(),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::platform::FixedDirectories;

    #[test]
    fn default_scheme_is_resolved_against_the_data_directory() {
        let platform = FixedDirectories::new("/config", "/data");
        let resolver = ResourceResolver::new(&platform);

        assert_eq!(
            PathBuf::from(resolver.resolve("default://foo.txt")),
            PathBuf::from("/data").join("foo.txt")
        );
    }

    #[test]
    fn other_values_pass_through() {
        let platform = FixedDirectories::new("/config", "/data");
        let resolver = ResourceResolver::new(&platform);

        assert_eq!(resolver.resolve("foo.txt"), "foo.txt");
        assert_eq!(resolver.resolve(""), "");
        assert_eq!(resolver.resolve("file://foo.txt"), "file://foo.txt");
    }
}

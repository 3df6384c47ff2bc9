//! Compilation session
//!
//! Holds the state shared by every node of a compilation run: configuration,
//! the identifier cache and the deduplicating diagnostics. Threaded through
//! the traversal by `&mut`; one session per module for a parallel driver.

use crate::codegen::names::NameCache;
use crate::config::CompilerConfig;
use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub config: CompilerConfig,
    pub names: NameCache,
    pub diagnostics: Diagnostics,
}

impl Session {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            names: NameCache::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Memoized [`camelize`](crate::codegen::names::camelize)
    pub fn camelize(&mut self, raw: &str) -> String {
        self.names.camelize(raw)
    }

    /// Memoized [`normalize`](crate::codegen::names::normalize)
    pub fn normalize(&mut self, raw: &str) -> String {
        self.names.normalize(raw)
    }

    /// Runtime package member, e.g. `com.tailf.jnc.YangString`
    pub fn runtime(&self, class: &str) -> String {
        format!("{}.{}", self.config.output.runtime_package, class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_memoized_per_session() {
        let mut session = Session::default();
        assert_eq!(session.normalize("ietf-ip"), "IetfIp");
        assert_eq!(session.camelize("ietf-ip"), "ietfIp");
        assert_eq!(session.names.len(), 2);

        let other = Session::default();
        assert!(other.names.is_empty());
    }

    #[test]
    fn test_runtime_package() {
        let mut config = CompilerConfig::default();
        config.output.runtime_package = "org.example.jnc".to_string();
        let session = Session::new(config);
        assert_eq!(session.runtime("YangString"), "org.example.jnc.YangString");
    }
}

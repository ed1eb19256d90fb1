//! Transport-security methods for the agent builder
//!
//! These only matter for secure proxies; on a plaintext proxy leg the
//! settings are carried but never consulted.

use crate::builder::core::AgentBuilder;

impl AgentBuilder {
    /// Override the server name presented during the TLS handshake
    ///
    /// Defaults to the proxy host, which is only wrong when the proxy is
    /// dialed by address but certified under a DNS name.
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn tls_server_name(mut self, name: impl Into<String>) -> Self {
        self.overrides.tls.server_name = Some(name.into());
        self
    }

    /// Trust an additional PEM-encoded root certificate for the proxy
    ///
    /// May be called repeatedly; every certificate lands in the root store.
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn extra_root_certificate_pem(mut self, pem: impl Into<String>) -> Self {
        self.overrides.tls.extra_root_certificates.push(pem.into());
        self
    }

    /// Toggle trust in the platform certificate store, on by default
    ///
    /// With native roots off the agent trusts the bundled webpki roots plus
    /// whatever was added explicitly.
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn native_roots(mut self, native_roots: bool) -> Self {
        self.overrides.tls.native_roots = native_roots;
        self
    }
}

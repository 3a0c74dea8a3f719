#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use urisign_core::*;

/// Build a signer from the process environment.
///
/// Config is loaded with [`Config::from_env`] over [`OsEnv`] and the signer
/// uses the system clock, so expiring urls work out of the box.
pub fn from_env() -> Result<UriSigner> {
    let config = Config::new().from_env(&OsEnv);
    Ok(UriSigner::from_config(config)?.with_clock(OsClock))
}

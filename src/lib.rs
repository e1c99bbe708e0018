//! Keyward - governance and remediation for Huawei Cloud KMS keys.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── keys          # list keys
//! │   ├── remediate     # per-key actions
//! │   ├── alias         # create-key-with-alias
//! │   └── output        # terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # keyward.toml + environment
//!     ├── domain/       # KeyRecord, KeyState, Outcome
//!     ├── provider/     # KmsClient / ObjectStore traits
//!     │   └── huawei    # signed HTTP transport
//!     ├── enumerate     # tag paging + key listing merge
//!     ├── filter        # value filters
//!     ├── actions/      # rotation, enable/disable, alias import
//!     ├── obs           # manifest URL + document
//!     └── remediate     # enumerate → filter → act
//! ```
//!
//! # Features
//!
//! - Tag-merged key inventory
//! - Rotation enable/disable with eligibility checks
//! - Key enable/disable
//! - Alias provisioning from a list or an OBS manifest

#[cfg(feature = "huawei")]
pub mod cli;
pub mod core;
pub mod error;

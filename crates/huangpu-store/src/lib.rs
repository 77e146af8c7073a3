//! On-disk data layout and CSV persistence for the huangpu A-share data
//! toolkit.
//!
//! - [`DataRoot`] / [`Dataset`] - the fixed directory layout
//! - [`write_table`] - atomic CSV persistence for a [`huangpu_types::DataTable`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/huangpu-data/huangpu/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod layout;
mod writer;

pub use layout::{DataRoot, Dataset, SNAPSHOT_FILE};
pub use writer::{StoreError, write_table};

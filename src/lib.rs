//! # fstree
//!
//! `fstree` turns a flat, unordered list of filesystem entry records into a multi-root
//! tree, and reports duplicate identifiers together with the shallowest level at which
//! one occurs.
//!
//! Records reference their parent by id. A record whose id equals its parent id is a
//! root. Children may appear before their parents in the input; records whose parent
//! never appears are handled according to [`OrphanPolicy`].
//!
//! # Features
//!
//! - `parallel`: Checks independent record lists in parallel using Rayon
//!   ([`check_duplicate_ids_batch`]).
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```
//! use fstree::{FsData, check_duplicate_ids, marshal_fs_tree};
//!
//! let records = vec![
//!     FsData::new(1, 1, "home", true),
//!     FsData::new(2, 1, "am", true),
//!     FsData::new(3, 2, "personal", true),
//!     FsData::new(3, 2, "personal", true),
//! ];
//!
//! let result = marshal_fs_tree(&records).expect("records are not empty");
//! assert_eq!(result.forest.len(), 1);
//! assert_eq!(result.duplicates[0].level_found, 2);
//!
//! let (node, level) = check_duplicate_ids(&records).expect("records are not empty");
//! assert_eq!(node.map(|n| n.id), Some(3));
//! assert_eq!(level, 2);
//! ```

mod engine;
mod error;
mod input;
mod options;
pub mod output;
mod scratch;
mod tree;
mod types;

pub use engine::{
    DuplicateReport, check_duplicate_ids, check_duplicate_ids_batch, check_duplicate_ids_with,
    marshal_fs_tree, marshal_fs_tree_with,
};
pub use error::FsTreeError;
pub use input::{load_records, parse_records};
pub use options::{MarshalBuilder, MarshalOptions, OrphanPolicy};
pub use tree::render_forest;
pub use types::{FsData, FsDuplicateDataNode, FsTree, MarshalResult};

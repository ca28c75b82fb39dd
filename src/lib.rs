//! rulefinder - a fuzzy-lookup server for tabletop rule documents.
//!
//! rulefinder indexes a directory tree of JSON rule documents (spells,
//! feats, creatures, items, conditions) by file name, then answers
//! free-text queries by ranking document names with a fuzzy string
//! scorer and returning the matched documents as one readable report.
//! The report is exposed to AI agents as a single MCP tool
//! (`pf2e_search`) served over stdio.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rulefinder::{JaroWinklerScorer, RuleIndex};
//! use rulefinder::search::{self, SearchOptions};
//!
//! let index = RuleIndex::build(Path::new("/data/pf2e/core")).unwrap();
//! let report = search::execute_search(
//!     "firebal",
//!     &index,
//!     &JaroWinklerScorer,
//!     &SearchOptions::default(),
//! );
//! println!("{report}");
//! ```

pub mod cli;
pub mod data_root;
pub mod error;
pub mod index;
pub mod matcher;
pub mod mcp;
pub mod search;
pub mod walker;

pub use data_root::DataRoot;
pub use error::{Error, Result};
pub use index::RuleIndex;
pub use matcher::{JaroWinklerScorer, ScoredKey, Scorer};

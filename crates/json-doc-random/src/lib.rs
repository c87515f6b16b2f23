//! Random [`json_doc::Value`] trees for round-trip and fuzz testing.
//!
//! Generation is driven by a caller-supplied [`rand::Rng`], so a seeded
//! generator from [`deterministic`] reproduces the same corpus on every run.
//!
//! ```
//! use json_doc_random::{deterministic, RandomValue, RandomValueOptions};
//!
//! let opts = RandomValueOptions::default();
//! let a = RandomValue::generate(&opts, &mut deterministic(7));
//! let b = RandomValue::generate(&opts, &mut deterministic(7));
//! assert_eq!(a, b);
//! assert!(a.as_object().is_some());
//! ```

pub mod number;
pub mod random_value;
pub mod string;
pub mod util;

pub use number::{random_double, random_int};
pub use random_value::{NodeOdds, NodeType, RandomValue, RandomValueOptions, RootNode};
pub use string::random_string;
pub use util::{count_nodes, deterministic, depth};

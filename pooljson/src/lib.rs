// SPDX-License-Identifier: Apache-2.0

//! A pool-allocated JSON tree and codec for memory-constrained targets.
//!
//! Every tree node lives in a fixed-capacity [`Pool`] built once up front;
//! parsing hires nodes from it and a failed parse fires everything it had
//! hired, so the pool never grows and never leaks. Nodes reference each
//! other through generational handles rather than pointers, and containers
//! track their children's parent back-references.
//!
//! ```
//! use pooljson::{parse, Pool, PoolConfig};
//!
//! let mut pool = Pool::new(PoolConfig::new(16, 4, 4));
//! let root = parse(r#"{"answer": 42, "tags": ["a", "b"]}"#, &mut pool).unwrap();
//!
//! let answer = pool.get_prop(root, "answer").unwrap().as_scal().unwrap();
//! assert_eq!(pool.as_int(answer), Some(42));
//! assert_eq!(
//!     pool.encode(root),
//!     r#"{"answer":42,"tags":["a","b"]}"#
//! );
//!
//! pool.fire(root);
//! assert_eq!(pool.free_scals(), 16);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod cursor;
mod encode;
mod escape;
mod node;
mod number;
mod parse_error;
mod parser;
mod pool;

pub use node::{ContainerId, DictId, NodeId, NodeKind, ScalId, Scalar, VectId};
pub use parse_error::ParseError;
pub use parser::{parse, parse_slice};
pub use pool::{Pool, PoolConfig, PoolKind};

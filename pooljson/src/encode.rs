// SPDX-License-Identifier: Apache-2.0

//! Tree-walk JSON renderer.
//!
//! Rendering never mutates the tree or the pool. Compact output carries no
//! whitespace at all; pretty output indents one tab per nesting level, puts
//! a space after each colon, and terminates with a single newline.

use crate::escape::escape_into;
use crate::node::{DictId, NodeId, ScalId, Scalar, VectId};
use crate::pool::Pool;

use alloc::string::String;
use core::fmt::Write;

impl Pool {
    /// Renders the subtree at `id` as compact JSON.
    pub fn encode(&self, id: impl Into<NodeId>) -> String {
        let mut out = String::new();
        self.encode_node(id.into(), &mut out, false, 0);
        out
    }

    /// Renders the subtree at `id` pretty-printed.
    pub fn encode_pretty(&self, id: impl Into<NodeId>) -> String {
        let mut out = String::new();
        self.encode_node(id.into(), &mut out, true, 0);
        out.push('\n');
        out
    }

    fn encode_node(&self, id: NodeId, out: &mut String, pretty: bool, depth: usize) {
        match id {
            NodeId::Scal(id) => self.encode_scal(id, out),
            NodeId::Dict(id) => self.encode_dict(id, out, pretty, depth),
            NodeId::Vect(id) => self.encode_vect(id, out, pretty, depth),
        }
    }

    fn encode_scal(&self, id: ScalId, out: &mut String) {
        match self.scalar(id) {
            None | Some(Scalar::Null) => out.push_str("null"),
            Some(Scalar::Int(value)) => {
                let _ = write!(out, "{value}");
            }
            Some(Scalar::Real(value)) => {
                let _ = write!(out, "{value}");
            }
            Some(Scalar::Bool(true)) => out.push_str("true"),
            Some(Scalar::Bool(false)) => out.push_str("false"),
            Some(Scalar::Str(value)) => {
                out.push('"');
                escape_into(out, value);
                out.push('"');
            }
        }
    }

    fn encode_dict(&self, id: DictId, out: &mut String, pretty: bool, depth: usize) {
        out.push('{');
        if pretty {
            out.push('\n');
        }
        let last = self.dict_len(id).saturating_sub(1);
        for (index, (key, child)) in self.dict_entries(id).enumerate() {
            indent(out, pretty, depth + 1);
            out.push('"');
            escape_into(out, key);
            out.push('"');
            out.push(':');
            if pretty {
                out.push(' ');
            }
            self.encode_node(child, out, pretty, depth + 1);
            if index < last {
                out.push(',');
            }
            if pretty {
                out.push('\n');
            }
        }
        indent(out, pretty, depth);
        out.push('}');
    }

    fn encode_vect(&self, id: VectId, out: &mut String, pretty: bool, depth: usize) {
        out.push('[');
        if pretty {
            out.push('\n');
        }
        let last = self.vect_len(id).saturating_sub(1);
        for (index, child) in self.vect_items(id).enumerate() {
            indent(out, pretty, depth + 1);
            self.encode_node(child, out, pretty, depth + 1);
            if index < last {
                out.push(',');
            }
            if pretty {
                out.push('\n');
            }
        }
        indent(out, pretty, depth);
        out.push(']');
    }
}

fn indent(out: &mut String, pretty: bool, depth: usize) {
    if pretty {
        for _ in 0..depth {
            out.push('\t');
        }
    }
}

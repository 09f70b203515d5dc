//! Conversion pass modules.
//!
//! Each pass is a self-contained rewrite over the whole document tree.
//! Passes are executed in order (0-5) and each assumes the output of previous
//! passes; in particular `$ref` rewriting (Pass 4) runs after request bodies
//! and responses have been reshaped (Passes 1-2).

pub mod p0_version;
pub mod p1_request_body;
pub mod p2_responses;
pub mod p3_parameters;
pub mod p4_definitions;
pub mod p5_cleanup;
pub mod pass_result;

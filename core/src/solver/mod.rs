//! The inference rules, in the order the episode controller runs them: the
//! basic counting rule swept to a fixed point, then subset constraint
//! subtraction over the whole grid, then the frontier fallback when nothing
//! certain remains.

pub(crate) mod deduce;
pub(crate) mod frontier;
pub(crate) mod subset;

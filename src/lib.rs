//! # hoc
//!
//! The high-order calculator, compiled to threaded code and run on a
//! small stack machine.
//!
//! Start the executable for an interactive session, or give it files
//! to run. Statements end at a newline or `;`.
//! ```text
//! hoc> x = 5
//! hoc> x += 3
//! hoc> print x
//!         8
//! hoc> while (x > 6) { x -= 1; print x }
//!         7
//!         6
//! hoc> x * 2
//! 12
//! ```
//!
//! Built-in functions are `sin cos atan exp log log10 sqrt int abs rand`
//! and the constants are `PI E GAMMA DEG PHI`. Pass `--trace` to see
//! every instruction on stderr as it executes.

pub mod lang;
pub mod mach;
pub mod term;

//! Deterministic risk scoring for blockchain wallets.
//!
//! The crate is a pure computation library: callers supply a wallet's
//! already-fetched transaction history, token holdings and externally
//! resolved reputation signals, and receive an immutable
//! [`analysis::AiWalletAnalysis`] record carrying derived metadata,
//! behavioral flags, an ordered score breakdown and a bounded final score
//! with its risk classification. Fetching, persistence and presentation
//! belong to the caller.

pub mod analysis;
pub mod core;

//! Remedy Classifier: the external language-model collaborator.
//!
//! The core treats the model as an untrusted black box: a log line goes
//! out, a strictly-structured verdict is expected back, and anything
//! that fails to parse is a per-line failure, never a crash. The
//! [`Classifier`] trait is the seam the decision engine depends on, so
//! the network never leaks into engine tests.

pub mod client;
pub mod prompt;

pub use client::{Classifier, ClassifierConfig, OllamaClassifier};

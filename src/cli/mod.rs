//! CLI infrastructure for the nimlab toolkit
//!
//! This module provides the command-line interface for training the
//! Q-learning agent and comparing strategies head-to-head.

pub mod commands;

pub mod client;

pub use client::{HttpSentimentClassifier, SentimentClassifier, create_classifier};

//! src/recognition/mod.rs
//!
//! OCR backends. The monitor only sees the `TextRecognizer` trait; the
//! Tesseract CLI is the backend used in production.

pub mod tesseract;

pub use tesseract::{TesseractFactory, TesseractWorker};

pub mod recognition_traits;
pub mod reporter_traits;
pub mod session_traits;

pub use recognition_traits::{RecognizerFactory, TextRecognizer};
pub use reporter_traits::CycleReporter;
pub use session_traits::{RemoteSession, SessionConnector};

//! Core of the AutoParts analyzer: history records, file intake, recognition
//! providers, the cancellable analysis runner and the page state machine.

pub mod analyzer;
pub mod export;
pub mod intake;
pub mod model;
pub mod notify;
pub mod page;
pub mod provider;
pub mod session;

pub use analyzer::{AnalysisEvent, Analyzer};
pub use export::export_history_csv;
pub use intake::{IntakeError, PICKER_EXTENSIONS, decode_data_uri, read_data_uri};
pub use model::{AnalysisResult, AnalysisStatus, PartIdentification, RecordId};
pub use notify::{Level, Notification};
pub use page::PartAnalyzerPage;
pub use provider::{DEFAULT_ANALYSIS_DELAY, FixedProvider, RecognitionError, RecognitionProvider};
pub use session::{Capabilities, ComparisonPreview, DropTarget, Session, Slot, Tab};

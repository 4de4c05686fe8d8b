//! Schema-driven form renderer: descriptors in, widgets and payloads out.

pub mod family;
pub mod field;
pub mod modal;
pub mod outcome;
pub mod values;
pub mod widget;

pub use family::{
    DatasourceFamily, DestinationFamily, ExpectationFamily, FormFamily, ModalMode, PayloadError,
    Prefill, SamplingFamily,
};
pub use field::{FormField, build_fields, validate_form};
pub use modal::{Effect, ModalEvent, ModalState, Phase, StatusLine, VariantOption};
pub use outcome::{Notice, NoticeLevel, SubmitOutcome, classify_response};
pub use values::FormValues;
pub use widget::FieldWidget;

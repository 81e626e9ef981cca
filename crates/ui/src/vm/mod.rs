mod markdown_vm;
mod quiz_vm;
mod setup_vm;

pub use markdown_vm::{markdown_to_html, markdown_to_plain, sanitize_html};
pub use quiz_vm::{
    INCORRECT_MESSAGE, LOADING_MESSAGE, OptionMark, OptionRowVm, QuizPanelVm, QuizVm,
    header_label, score_label, start_quiz,
};
pub use setup_vm::SetupFormVm;

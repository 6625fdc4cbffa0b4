pub mod format;
pub mod output;

pub use output::{
    display_error, display_exit_outcome, display_notice, display_page, display_receipt,
    display_session, display_statistics,
};

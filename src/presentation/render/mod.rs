mod cards;
mod html;

pub use cards::{
    FieldCard, LIST_SEPARATOR, display_value, format_field_name, format_type_heading,
    render_cards, title_case,
};
pub use html::{
    CLASSIFICATION_FAILED_MESSAGE, escape_html, render_error_page, render_result_page,
    render_upload_page, unmapped_type_message,
};

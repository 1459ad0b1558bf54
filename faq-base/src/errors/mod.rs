pub mod faq_base_error;

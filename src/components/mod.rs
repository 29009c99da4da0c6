pub mod css_baseline;
pub mod home_page;
pub mod layout;
pub mod primary_app_bar;

// ページコンテナ

pub mod home;
pub mod year_detail;

pub use home::HomePage;
pub use year_detail::YearPage;

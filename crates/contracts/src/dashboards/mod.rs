pub mod d400_dashboard_data;
pub mod d401_indicator_overview;

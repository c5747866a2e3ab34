pub mod use_view_coordinator;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod driver_repo;
pub mod event_repo;
pub mod lap_time_repo;
pub mod part_repo;
pub mod setup_sheet_repo;
pub mod upload_repo;
pub mod user_repo;
pub mod vehicle_repo;

pub use driver_repo::DriverRepo;
pub use event_repo::EventRepo;
pub use lap_time_repo::LapTimeRepo;
pub use part_repo::PartRepo;
pub use setup_sheet_repo::SetupSheetRepo;
pub use upload_repo::UploadRepo;
pub use user_repo::UserRepo;
pub use vehicle_repo::VehicleRepo;

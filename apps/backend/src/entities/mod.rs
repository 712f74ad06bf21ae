pub mod receipts;
pub mod request_backups;
pub mod request_image_backups;
pub mod request_images;
pub mod requests;
pub mod suppliers;
pub mod tire_details;
pub mod users;
pub mod vehicles;

pub use receipts::Entity as Receipts;
pub use receipts::Model as Receipt;
pub use request_backups::Entity as RequestBackups;
pub use request_backups::Model as RequestBackup;
pub use request_image_backups::Entity as RequestImageBackups;
pub use request_image_backups::Model as RequestImageBackup;
pub use request_images::Entity as RequestImages;
pub use request_images::Model as RequestImage;
pub use requests::Entity as Requests;
pub use requests::Model as Request;
pub use suppliers::Entity as Suppliers;
pub use suppliers::Model as Supplier;
pub use tire_details::Entity as TireDetails;
pub use tire_details::Model as TireDetail;
pub use users::Entity as Users;
pub use users::Model as User;
pub use vehicles::Entity as Vehicles;
pub use vehicles::Model as Vehicle;

pub mod check_in;
pub mod client;
pub mod organization;
pub mod organization_user;
pub mod report;
pub mod sale;
pub mod serde_helpers;
pub mod user;

pub use check_in::{CheckIn, CheckInCreate, queue_order, sort_queue};
pub use client::{Client, ClientSave};
pub use organization::{
    Organization, OrganizationCreate, OrganizationUpdate, OrganizationWithRoles, OwnerRef,
};
pub use organization_user::{OrganizationMember, OrganizationUser};
pub use report::{EmployeeSummary, EndOfDayReport, EndOfDayReportSubmit};
pub use sale::{Sale, SaleCreate, SaleUpdate};
pub use user::{User, UserCreate, UserUpdate};

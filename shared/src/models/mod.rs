//! Data models shared by server and clients

pub mod auth;
pub mod employee;
pub mod serde_helpers;

pub use auth::{AuthRequest, AuthResponse, Credentials};
pub use employee::{
    CredentialMethod, CredentialOutcome, Employee, EmployeeCreate, EmployeeCreated, EmployeePatch,
    EmployeeStatus, EmployeeUpdated, EmployeeView, ExistsResponse, MessageResponse, NewEmployee,
};

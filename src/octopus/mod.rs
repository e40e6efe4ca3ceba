//! Octopus Deploy server access for octaudit
//!
//! This module is the boundary between the audit core and the Octopus REST
//! API. The [`OctopusApi`] trait describes exactly the read operations the
//! audit needs; [`OctopusClient`] implements it over HTTP. Collectors are
//! generic over the trait so they can be exercised against an in-memory
//! provider in tests without a server.
//!
//! Only read endpoints are consumed - octaudit never modifies anything on the
//! server.

pub mod client;
pub mod models;

pub use client::OctopusClient;
pub use models::{
    ActionResource, DeploymentProcessResource, EnvironmentResource, LibraryVariableSetResource,
    ProjectResource, PropertyValue, StepResource, VariableResource, VariableSetResource,
};

use anyhow::Result;

/// Read-only contract over the Octopus Deploy data the audit consumes
///
/// Implementations: [`OctopusClient`] (HTTP, production) and in-memory
/// fixtures in the test suites. All methods are independent lookups; the
/// audit issues them sequentially, never concurrently.
pub trait OctopusApi {
    /// All deployment environments, in server order
    fn environments(&self) -> impl Future<Output = Result<Vec<EnvironmentResource>>>;

    /// Look up a project by its display name
    ///
    /// Fails with [`AuditError::ProjectNotFound`](crate::core::AuditError::ProjectNotFound)
    /// when no project carries that name.
    fn find_project_by_name(&self, name: &str) -> impl Future<Output = Result<ProjectResource>>;

    /// The deployment process (steps and actions) for a project
    fn deployment_process(&self, id: &str)
    -> impl Future<Output = Result<DeploymentProcessResource>>;

    /// All library variable sets known to the server
    fn library_variable_sets(
        &self,
    ) -> impl Future<Output = Result<Vec<LibraryVariableSetResource>>>;

    /// The variables of a project or library variable set
    fn variable_set(&self, id: &str) -> impl Future<Output = Result<VariableSetResource>>;
}

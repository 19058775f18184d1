//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use fleetguard::{
    AuthorizationSystem, CompanyPermissionMatrix, Config, Principal, Resource, ResourceFlags,
    Role,
};

/// System over the default catalog with an open directory
pub fn open_system() -> AuthorizationSystem {
    AuthorizationSystem::new(&Config::default())
}

pub fn principal(id: &str, role: Role) -> Principal {
    Principal::new(id, role)
}

/// Factory for company permission matrices
pub struct MatrixFactory;

impl MatrixFactory {
    /// Nothing allowed anywhere
    pub fn empty() -> CompanyPermissionMatrix {
        CompanyPermissionMatrix::default()
    }

    /// Every flag on every business resource
    pub fn full() -> CompanyPermissionMatrix {
        CompanyPermissionMatrix::uniform(ResourceFlags::FULL)
    }

    /// Only the given resource carries the given flags
    pub fn only(resource: Resource, flags: ResourceFlags) -> CompanyPermissionMatrix {
        match Self::empty().with(resource, flags) {
            Ok(matrix) => matrix,
            Err(e) => panic!("{} is not a matrix resource: {}", resource, e),
        }
    }

    /// Read and write without delete
    pub fn read_write() -> ResourceFlags {
        ResourceFlags {
            read: true,
            write: true,
            delete: false,
        }
    }
}

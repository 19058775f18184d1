//! RBAC type definitions

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// User identifier as issued by the authentication collaborator
pub type UserId = String;

/// Company (tenant) identifier
pub type CompanyId = String;

/// Value outside one of the closed vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVocabulary {
    /// Which vocabulary was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

/// Protected resource category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Vehicles,
    Rentals,
    Expenses,
    Settlements,
    Customers,
    Insurances,
    Maintenance,
    Protocols,
    Statistics,
    Pricing,
    Companies,
    Finances,
    /// Wildcard: every resource
    #[serde(rename = "*")]
    All,
}

impl Resource {
    /// Resources covered by a company permission matrix
    pub const BUSINESS: [Resource; 8] = [
        Resource::Vehicles,
        Resource::Rentals,
        Resource::Expenses,
        Resource::Settlements,
        Resource::Customers,
        Resource::Insurances,
        Resource::Maintenance,
        Resource::Protocols,
    ];

    /// Every concrete resource (the wildcard excluded)
    pub const ALL_CONCRETE: [Resource; 12] = [
        Resource::Vehicles,
        Resource::Rentals,
        Resource::Expenses,
        Resource::Settlements,
        Resource::Customers,
        Resource::Insurances,
        Resource::Maintenance,
        Resource::Protocols,
        Resource::Statistics,
        Resource::Pricing,
        Resource::Companies,
        Resource::Finances,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Vehicles => "vehicles",
            Resource::Rentals => "rentals",
            Resource::Expenses => "expenses",
            Resource::Settlements => "settlements",
            Resource::Customers => "customers",
            Resource::Insurances => "insurances",
            Resource::Maintenance => "maintenance",
            Resource::Protocols => "protocols",
            Resource::Statistics => "statistics",
            Resource::Pricing => "pricing",
            Resource::Companies => "companies",
            Resource::Finances => "finances",
            Resource::All => "*",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Resource::All)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = UnknownVocabulary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Resource::All);
        }
        Resource::ALL_CONCRETE
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| UnknownVocabulary {
                kind: "resource",
                value: s.to_string(),
            })
    }
}

/// Operation on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownVocabulary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownVocabulary {
                kind: "action",
                value: s.to_string(),
            })
    }
}

/// Principal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    CompanyAdmin,
    Employee,
    TempWorker,
    Mechanic,
    SalesRep,
    Investor,
    /// Read-only account
    User,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::CompanyAdmin,
        Role::Employee,
        Role::TempWorker,
        Role::Mechanic,
        Role::SalesRep,
        Role::Investor,
        Role::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::CompanyAdmin => "company_admin",
            Role::Employee => "employee",
            Role::TempWorker => "temp_worker",
            Role::Mechanic => "mechanic",
            Role::SalesRep => "sales_rep",
            Role::Investor => "investor",
            Role::User => "user",
        }
    }

    /// Admin roles bypass every rule and condition
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVocabulary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownVocabulary {
                kind: "role",
                value: s.to_string(),
            })
    }
}

/// Extra constraints attached to a rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Condition {
    /// Principal must be the resource's recorded owner
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub own_only: bool,
    /// Resource must belong to the principal's company scope
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub company_only: bool,
    /// Amounts above this ceiling flag approval instead of denying
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    /// Every use of the rule flags approval
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub approval_required: bool,
}

impl Condition {
    pub fn own_only() -> Self {
        Self {
            own_only: true,
            ..Self::default()
        }
    }

    pub fn company_only() -> Self {
        Self {
            company_only: true,
            ..Self::default()
        }
    }

    pub fn max_amount(ceiling: f64) -> Self {
        Self {
            max_amount: Some(ceiling),
            ..Self::default()
        }
    }

    pub fn approval_required() -> Self {
        Self {
            approval_required: true,
            ..Self::default()
        }
    }

    /// True when the record constrains nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One catalog entry: a resource, the actions it allows, and its conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionRule {
    pub resource: Resource,
    pub actions: BTreeSet<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Condition>,
}

impl PermissionRule {
    pub fn new(resource: Resource, actions: &[Action]) -> Self {
        Self {
            resource,
            actions: actions.iter().copied().collect(),
            conditions: None,
        }
    }

    /// Rule granting every action on every resource
    pub fn unrestricted() -> Self {
        Self::new(Resource::All, &Action::ALL)
    }

    pub fn with_conditions(mut self, conditions: Condition) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// The actor a decision is requested for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_company_id: Option<CompanyId>,
}

impl Principal {
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            home_company_id: None,
        }
    }

    pub fn with_home_company(mut self, company_id: impl Into<CompanyId>) -> Self {
        self.home_company_id = Some(company_id.into());
        self
    }
}

/// Per-call facts about the resource being acted on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionContext {
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub resource_company_id: Option<CompanyId>,
    #[serde(default)]
    pub resource_owner_id: Option<UserId>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl DecisionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, company_id: impl Into<CompanyId>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    pub fn with_resource_company(mut self, company_id: impl Into<CompanyId>) -> Self {
        self.resource_company_id = Some(company_id.into());
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<UserId>) -> Self {
        self.resource_owner_id = Some(owner_id.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Company a grant lookup is scoped to
    pub fn grant_company(&self) -> Option<&str> {
        self.company_id
            .as_deref()
            .or(self.resource_company_id.as_deref())
    }
}

/// Condition that can deny a matched rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    OwnOnly,
    CompanyOnly,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::OwnOnly => f.write_str("ownOnly"),
            ConditionKind::CompanyOnly => f.write_str("companyOnly"),
        }
    }
}

/// Why a decision denied access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("not authenticated")]
    AuthenticationMissing,
    #[error("unknown resource/action")]
    UnknownResource(String),
    #[error("unknown resource/action")]
    UnknownAction(String),
    #[error("{0} condition violated")]
    ConditionViolation(ConditionKind),
    #[error("no matching rule or grant")]
    NoMatchingRuleOrGrant,
}

impl Serialize for DenialReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a permission check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub has_access: bool,
    pub requires_approval: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
}

impl Decision {
    pub fn allow(requires_approval: bool) -> Self {
        Self {
            has_access: true,
            requires_approval,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            has_access: false,
            requires_approval: false,
            reason: Some(reason),
        }
    }

    /// Allowed, but a separate approval step is expected
    pub fn is_approval_gated(&self) -> bool {
        self.has_access && self.requires_approval
    }
}

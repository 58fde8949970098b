//! Cluster Member Identity
//!
//! Resolves where a member sits in the replication topology:
//! - Name, pod name and StatefulSet ordinal
//! - Address other members connect to
//! - Group replication IP whitelist
//!
//! Two network modes are supported, overlay and host network. Identity is
//! resolved once at startup for the local member, and on demand for peers
//! named by group seeds.

mod env;
mod errors;
mod hostname;
mod instance;
mod ordinal;
mod seed;
mod whitelist;

pub use env::{
    parse_bool, ClusterEnv, Secret, ENV_CLUSTER_NAME, ENV_DR_HOST, ENV_MULTI_MASTER,
    ENV_NAMESPACE, ENV_POD_IP, ENV_POD_NAME, ENV_ROOT_PASSWORD, ENV_USE_HOST_NETWORK,
    MYSQL_DB_PORT,
};
pub use errors::{IdentityError, IdentityResult};
pub use hostname::{HostnameSource, StaticHostname, SystemHostname};
pub use instance::{
    HostNetworkMember, IdentitySummary, MemberIdentity, NetworkMode, OverlayNetworkMember,
    ADMIN_USER,
};
pub use ordinal::{parent_name_and_ordinal, NO_ORDINAL};
pub use seed::{pod_name_from_seed, split_host_port};
pub use whitelist::{whitelist_cidr, PrivateRange, PRIVATE_RANGES};

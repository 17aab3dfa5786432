//! The trait resource authors implement.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::context::Context;
use crate::error::ResourceResult;

/// A user-authored resource implementation.
///
/// `init` gathers whatever the resource needs from the target. It signals
/// inapplicability with [`ResourceError::skip`](crate::ResourceError::skip)
/// and evaluation problems with [`ResourceError::fail`](crate::ResourceError::fail);
/// both become instance state instead of errors. Anything else it returns
/// aborts construction.
///
/// ```
/// use serde::Deserialize;
/// use vigil_resource::{Context, Resource, ResourceError, ResourceResult};
///
/// #[derive(Deserialize)]
/// struct ServiceParams {
///     name: String,
/// }
///
/// struct Service {
///     running: bool,
/// }
///
/// impl Resource for Service {
///     type Params = ServiceParams;
///
///     async fn init(ctx: &Context, params: ServiceParams) -> ResourceResult<Self> {
///         let out = ctx.run_command(&format!("systemctl is-active {}", params.name)).await?;
///         if out.exit_status == 4 {
///             return Err(ResourceError::skip(format!("no service named {}", params.name)));
///         }
///         Ok(Self { running: out.is_success() })
///     }
/// }
/// ```
pub trait Resource: Sized + Send + Sync + 'static {
    /// Constructor arguments.
    type Params: DeserializeOwned + Send + 'static;

    /// Build the resource against the target behind `ctx`.
    fn init(
        ctx: &Context,
        params: Self::Params,
    ) -> impl Future<Output = ResourceResult<Self>> + Send;
}

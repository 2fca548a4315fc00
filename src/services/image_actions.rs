//! AMI and launch-template operations
//!
//! AWS is not called. Each action validates its parameters and echoes the
//! accepted request back as `{"ok": <params>}`.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::errors::internal::ActionError;
use crate::errors::InternalError;
use crate::services::audit_logger::PrivilegedAction;
use crate::types::dto::images::{
    ActionAccepted, CreateAmiRequest, CreateLaunchTemplateRequest, UpdateLaunchTemplateRequest,
};

const LAUNCH_TEMPLATE_NAME_MIN: usize = 3;
const LAUNCH_TEMPLATE_NAME_MAX: usize = 128;
const LAUNCH_TEMPLATE_ID_PREFIX: &str = "lt-";

/// Image from the instance at `ip`
///
/// Parameter checks mirror what EC2 would reject, and stand in for the
/// AWS call until one is wired in.
pub struct CreateAmi;

pub struct CreateLaunchTemplate;

pub struct UpdateLaunchTemplate;

#[async_trait]
impl PrivilegedAction for CreateAmi {
    const NAME: &'static str = "create_ami";
    type Params = CreateAmiRequest;
    type Response = ActionAccepted;

    async fn execute(&self, params: &CreateAmiRequest) -> Result<ActionAccepted, InternalError> {
        params
            .ip
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ActionError::invalid_parameter("ip", "must be an IPv4 or IPv6 address"))?;

        accepted(params)
    }
}

#[async_trait]
impl PrivilegedAction for CreateLaunchTemplate {
    const NAME: &'static str = "create_launch_template";
    type Params = CreateLaunchTemplateRequest;
    type Response = ActionAccepted;

    async fn execute(&self, params: &CreateLaunchTemplateRequest) -> Result<ActionAccepted, InternalError> {
        validate_launch_template_name(&params.launch_template_name)?;
        accepted(params)
    }
}

#[async_trait]
impl PrivilegedAction for UpdateLaunchTemplate {
    const NAME: &'static str = "update_launch_template";
    type Params = UpdateLaunchTemplateRequest;
    type Response = ActionAccepted;

    async fn execute(&self, params: &UpdateLaunchTemplateRequest) -> Result<ActionAccepted, InternalError> {
        validate_launch_template_id(&params.launch_template_id)?;
        accepted(params)
    }
}

fn accepted<P: serde::Serialize>(params: &P) -> Result<ActionAccepted, InternalError> {
    let ok = serde_json::to_value(params)
        .map_err(|e| InternalError::parse("action_params", e.to_string()))?;
    Ok(ActionAccepted { ok })
}

/// Same character set and length limits EC2 applies to launch template names
fn validate_launch_template_name(name: &str) -> Result<(), ActionError> {
    let len = name.chars().count();
    if !(LAUNCH_TEMPLATE_NAME_MIN..=LAUNCH_TEMPLATE_NAME_MAX).contains(&len) {
        return Err(ActionError::invalid_parameter(
            "launch_template_name",
            format!(
                "must be between {} and {} characters",
                LAUNCH_TEMPLATE_NAME_MIN, LAUNCH_TEMPLATE_NAME_MAX
            ),
        ));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || "()./-_ ".contains(c);
    if !name.chars().all(allowed) {
        return Err(ActionError::invalid_parameter(
            "launch_template_name",
            "may only contain letters, digits, spaces and ( ) . / - _",
        ));
    }

    Ok(())
}

/// `lt-` followed by 8 to 17 lowercase hex digits
fn validate_launch_template_id(id: &str) -> Result<(), ActionError> {
    let hex = id
        .strip_prefix(LAUNCH_TEMPLATE_ID_PREFIX)
        .filter(|hex| (8..=17).contains(&hex.len()))
        .filter(|hex| hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));

    match hex {
        Some(_) => Ok(()),
        None => Err(ActionError::invalid_parameter(
            "launch_template_id",
            "must look like lt-0123456789abcdef0",
        )),
    }
}

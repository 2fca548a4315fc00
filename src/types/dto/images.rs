use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Parameters for AMI creation
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CreateAmiRequest {
    /// Address of the instance to image
    pub ip: String,
}

/// Parameters for launch template creation
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CreateLaunchTemplateRequest {
    pub launch_template_name: String,
}

/// Parameters for launch template update
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLaunchTemplateRequest {
    pub launch_template_id: String,
}

/// Acknowledgement echoing the accepted parameters
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ActionAccepted {
    pub ok: serde_json::Value,
}

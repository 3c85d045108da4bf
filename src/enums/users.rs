use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResp {
    pub status: String,
    pub redirect: Option<String>,
    pub id_token: Option<String>,
    pub error: Option<String>,
}

//! MCP tool handlers for the VN KYC server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::{names_match, normalize_vn_name, validate_vn_phone, DocumentType};
use crate::error::{ProfileError, StoreError};
use crate::format::{format_compact_currency, format_currency, parse_amount, Currency};
use crate::observability::{MetricsTracker, Timer};
use crate::services::{
    CompareAndUpdateParams, KycOutcome, KycService, KycSubmission, NewProfileParams,
    ProfileService,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing phone validation, name matching and KYC tools.
#[derive(Clone)]
pub struct KycMcpServer {
    profile_service: Arc<dyn ProfileService>,
    kyc_service: Arc<dyn KycService>,
    metrics: MetricsTracker,
    default_currency: Currency,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for KycMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "vn-kyc-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for Vietnamese customer onboarding - validates mobile numbers, compares names across diacritics, formats amounts, and runs KYC document verification against stored profiles.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ValidatePhoneParams {
    phone: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NormalizeNameParams {
    name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CompareNamesParams {
    first: String,
    second: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatAmountParams {
    /// Amount as text; blank formats as zero
    amount: String,
    /// USD, EUR or VND
    #[serde(default)]
    currency: Option<String>,
    /// USD compact notation such as $1.5M
    #[serde(default)]
    compact: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreateProfileToolParams {
    user_id: String,
    email: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UserIdParams {
    user_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SaveCustomerInfoParams {
    user_id: String,
    full_name: String,
    phone: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PreviewKycMatchParams {
    user_id: String,
    document_full_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DocumentParams {
    /// cccd, cmnd or passport (default: cccd)
    #[serde(default)]
    document_type: Option<String>,
    document_number: String,
    document_full_name: String,
    #[serde(default)]
    note: Option<String>,
}

impl DocumentParams {
    fn into_submission(self) -> Result<KycSubmission, McpError> {
        let document_type = match self.document_type.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse::<DocumentType>().map_err(invalid_params)?
            }
            _ => DocumentType::default(),
        };
        Ok(KycSubmission {
            document_type,
            document_number: self.document_number,
            document_full_name: self.document_full_name,
            note: self.note,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct VerifyKycDocumentParams {
    user_id: String,
    #[serde(flatten)]
    document: DocumentParams,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CompareAndUpdateToolParams {
    user_id: String,
    /// Full name currently typed in the customer info form
    full_name: String,
    /// Phone currently typed in the customer info form
    #[serde(default)]
    phone: String,
    #[serde(flatten)]
    document: DocumentParams,
    /// Submit for manual review even though the names differ
    #[serde(default)]
    submit_on_mismatch: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ReviewKycVerificationParams {
    user_id: String,
    verification_id: String,
    approve: bool,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NameComparison {
    first_normalized: String,
    second_normalized: String,
    names_match: bool,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Caller mistakes become invalid params; store failures stay internal.
fn profile_error(e: ProfileError) -> McpError {
    match e {
        ProfileError::Store(StoreError::NotFound(_)) => McpError {
            code: ErrorCode::RESOURCE_NOT_FOUND,
            message: Cow::from(e.to_string()),
            data: None,
        },
        ProfileError::Store(StoreError::Io(_))
        | ProfileError::Store(StoreError::Json(_))
        | ProfileError::Store(StoreError::Conflict(_)) => {
            tracing::error!("Profile store failure: {}", e);
            to_mcp_error(e)
        }
        _ => {
            tracing::warn!("Rejected request: {}", e);
            invalid_params(e)
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl KycMcpServer {
    /// Create a new KYC MCP server.
    pub fn new(
        profile_service: Arc<dyn ProfileService>,
        kyc_service: Arc<dyn KycService>,
        metrics: MetricsTracker,
        default_currency: Currency,
    ) -> Self {
        Self {
            profile_service,
            kyc_service,
            metrics,
            default_currency,
            tool_router: Self::tool_router(),
        }
    }

    /// Shared metrics, for the shutdown summary.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    fn finish_kyc(
        &self,
        timer: Timer,
        outcome: Result<KycOutcome, ProfileError>,
    ) -> Result<CallToolResult, McpError> {
        timer.finish_with_status(outcome.is_ok());
        let outcome = outcome.map_err(profile_error)?;
        self.metrics.track_kyc_decision(outcome.decision);
        json_result(&outcome)
    }

    /// Validate a Vietnamese mobile number.
    #[tool(
        description = "Validate a Vietnamese mobile number typed in any common form (0912345678, +84 912 345 678, 84912345678). Returns isValid, a Vietnamese message, and the normalized local and E.164 forms when valid."
    )]
    async fn validate_phone(
        &self,
        params: Parameters<ValidatePhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = validate_vn_phone(&params.0.phone);
        self.metrics.track_phone_validation(result.error);
        json_result(&result)
    }

    /// Show the comparison form of a name.
    #[tool(
        description = "Normalize a Vietnamese name for comparison: removes diacritics (including đ), lowercases, and collapses punctuation and spacing."
    )]
    async fn normalize_name(
        &self,
        params: Parameters<NormalizeNameParams>,
    ) -> Result<CallToolResult, McpError> {
        let name = params.0.name;
        json_result(&serde_json::json!({
            "input": name,
            "normalized": normalize_vn_name(&name),
        }))
    }

    /// Compare two names ignoring diacritics, case and punctuation.
    #[tool(
        description = "Check whether two names refer to the same person once diacritics, case, spacing and punctuation are ignored. Exact comparison, no fuzzy matching."
    )]
    async fn compare_names(
        &self,
        params: Parameters<CompareNamesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let matched = names_match(&params.first, &params.second);
        self.metrics.track_name_comparison(matched);

        json_result(&NameComparison {
            first_normalized: normalize_vn_name(&params.first),
            second_normalized: normalize_vn_name(&params.second),
            names_match: matched,
        })
    }

    /// Format an amount for display.
    #[tool(
        description = "Format an amount as currency text with symbol and thousands separators, e.g. $41,700.50 or ₫25,000,000. With compact=true the amount is shown in USD as $1.5M; other currencies are rejected."
    )]
    async fn format_amount(
        &self,
        params: Parameters<FormatAmountParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let amount = parse_amount(&params.amount);

        let requested = match params.currency.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                Some(raw.parse::<Currency>().map_err(invalid_params)?)
            }
            _ => None,
        };

        let (formatted, currency) = if params.compact.unwrap_or(false) {
            if requested.is_some_and(|c| c != Currency::Usd) {
                return Err(invalid_params("Compact notation is only available in USD"));
            }
            (format_compact_currency(amount), Currency::Usd)
        } else {
            let currency = requested.unwrap_or(self.default_currency);
            (format_currency(amount, currency), currency)
        };

        json_result(&serde_json::json!({
            "formatted": formatted,
            "currency": currency,
        }))
    }

    /// Register a new customer profile.
    #[tool(
        description = "Register a new customer profile with id and email, optionally with full name and a Vietnamese mobile number."
    )]
    async fn create_profile(
        &self,
        params: Parameters<CreateProfileToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(user_id = %params.user_id, "create_profile called");

        let profile = self
            .profile_service
            .create_profile(NewProfileParams {
                user_id: params.user_id,
                email: params.email,
                full_name: params.full_name,
                phone: params.phone,
            })
            .await
            .map_err(profile_error)?;

        json_result(&profile)
    }

    /// Retrieve a profile.
    #[tool(description = "Retrieve a customer profile by user id")]
    async fn get_profile(
        &self,
        params: Parameters<UserIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let profile = self
            .profile_service
            .get_profile(&params.0.user_id)
            .await
            .map_err(profile_error)?;

        json_result(&profile)
    }

    /// Save the customer info form.
    #[tool(
        description = "Save the customer's full name and mobile number. The phone must be a valid Vietnamese mobile number; it is stored normalized together with its E.164 form."
    )]
    async fn save_customer_info(
        &self,
        params: Parameters<SaveCustomerInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(user_id = %params.user_id, "save_customer_info called");

        let result = self
            .profile_service
            .save_customer_info(&params.user_id, &params.full_name, &params.phone)
            .await;

        // A rejected phone is still a phone validation
        match &result {
            Err(ProfileError::InvalidPhone(e)) => self.metrics.track_phone_validation(Some(*e)),
            Ok(_) => self.metrics.track_phone_validation(None),
            Err(_) => {}
        }

        json_result(&result.map_err(profile_error)?)
    }

    /// Live name-match indicator for the KYC form.
    #[tool(
        description = "Check whether a document name matches the profile's account name while the customer is typing. Returns null when either name is blank."
    )]
    async fn preview_kyc_match(
        &self,
        params: Parameters<PreviewKycMatchParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let names_match = self
            .kyc_service
            .preview_match(&params.user_id, &params.document_full_name)
            .await
            .map_err(profile_error)?;

        json_result(&serde_json::json!({ "namesMatch": names_match }))
    }

    /// Submit an identity document for verification.
    #[tool(
        description = "Submit an identity document (CCCD, CMND or passport). A name matching the account name is approved immediately; otherwise the submission waits for manual review."
    )]
    async fn verify_kyc_document(
        &self,
        params: Parameters<VerifyKycDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(user_id = %params.user_id, "verify_kyc_document called");
        let timer = Timer::new("verify_kyc_document");

        let submission = params.document.into_submission()?;
        let outcome = self
            .kyc_service
            .verify_document(&params.user_id, submission)
            .await;

        self.finish_kyc(timer, outcome)
    }

    /// Compare the customer info form with a document and update the profile.
    #[tool(
        description = "Compare the name in the customer info form with an identity document and update the profile from the document. When the names differ nothing is saved unless submit_on_mismatch is true, in which case the submission waits for manual review."
    )]
    async fn compare_and_update_from_document(
        &self,
        params: Parameters<CompareAndUpdateToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(
            user_id = %params.user_id,
            submit_on_mismatch = params.submit_on_mismatch,
            "compare_and_update_from_document called"
        );
        let timer = Timer::new("compare_and_update_from_document");

        let submission = params.document.into_submission()?;
        let outcome = self
            .kyc_service
            .compare_and_update(
                &params.user_id,
                CompareAndUpdateParams {
                    full_name: params.full_name,
                    phone: params.phone,
                    submission,
                    submit_on_mismatch: params.submit_on_mismatch,
                },
            )
            .await;

        self.finish_kyc(timer, outcome)
    }

    /// Approve or reject a submission waiting for manual review.
    #[tool(
        description = "Approve or reject a KYC submission that is pending manual review. Approval adopts the document name as the profile's full name."
    )]
    async fn review_kyc_verification(
        &self,
        params: Parameters<ReviewKycVerificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let timer = Timer::new("review_kyc_verification");

        let outcome = self
            .kyc_service
            .review_verification(
                &params.user_id,
                &params.verification_id,
                params.approve,
                params.note,
            )
            .await;

        self.finish_kyc(timer, outcome)
    }

    /// Verification history for a user.
    #[tool(
        description = "List a user's KYC submissions, newest first, with counts of approved, pending and rejected submissions"
    )]
    async fn get_verification_status(
        &self,
        params: Parameters<UserIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .kyc_service
            .verification_status(&params.0.user_id)
            .await
            .map_err(profile_error)?;

        json_result(&report)
    }

    /// Server-side counters.
    #[tool(description = "Get counts of phone validations, name comparisons and KYC decisions since the server started")]
    async fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.metrics.snapshot())
    }
}

//! Transaction preparation pipeline.
//!
//! # States
//! ```text
//! Start → SignInfo → GasPrice → GasLimit → Nonce → Broadcast → Done
//!            │          │          │         │         │
//!            └──────────┴──────────┴─────────┴─────────┴──→ Aborted(stage)
//! ```
//!
//! Each stage is one API call. A failure aborts the run immediately; stages
//! already completed are not compensated.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::endpoints::{self, with_query};
use crate::client::{ApiFailure, ApiResult, ExchangeApi};
use crate::pipeline::params::TransactionParams;

/// One call of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    SignInfo,
    GasPrice,
    GasLimit,
    Nonce,
    Broadcast,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::SignInfo,
        Stage::GasPrice,
        Stage::GasLimit,
        Stage::Nonce,
        Stage::Broadcast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::SignInfo => "sign-info",
            Stage::GasPrice => "gas-price",
            Stage::GasLimit => "gas-limit",
            Stage::Nonce => "nonce",
            Stage::Broadcast => "broadcast",
        }
    }

    /// The stage that follows this one, if any.
    pub fn next(&self) -> Option<Stage> {
        let idx = Stage::ALL.iter().position(|s| s == self)?;
        Stage::ALL.get(idx + 1).copied()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a pipeline is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Running(Stage),
    Done,
    Aborted(Stage),
}

/// Outputs of completed stages, scoped to one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineContext {
    pub sign_info: Option<Value>,
    pub gas_price: Option<Value>,
    pub gas_limit: Option<Value>,
    pub nonce: Option<Value>,
    pub broadcast: Option<Value>,
}

impl PipelineContext {
    /// Record a stage's payload.
    pub fn record(&mut self, stage: Stage, payload: Value) {
        *self.slot_mut(stage) = Some(payload);
    }

    /// Payload of a completed stage.
    pub fn get(&self, stage: Stage) -> Option<&Value> {
        match stage {
            Stage::SignInfo => self.sign_info.as_ref(),
            Stage::GasPrice => self.gas_price.as_ref(),
            Stage::GasLimit => self.gas_limit.as_ref(),
            Stage::Nonce => self.nonce.as_ref(),
            Stage::Broadcast => self.broadcast.as_ref(),
        }
    }

    /// Number of stages with a recorded result.
    pub fn completed(&self) -> usize {
        Stage::ALL.iter().filter(|s| self.get(**s).is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed() == Stage::ALL.len()
    }

    fn slot_mut(&mut self, stage: Stage) -> &mut Option<Value> {
        match stage {
            Stage::SignInfo => &mut self.sign_info,
            Stage::GasPrice => &mut self.gas_price,
            Stage::GasLimit => &mut self.gas_limit,
            Stage::Nonce => &mut self.nonce,
            Stage::Broadcast => &mut self.broadcast,
        }
    }
}

/// A run aborted at `stage`.
#[derive(Debug, Clone, Error)]
#[error("stage {stage} failed: {failure}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub failure: ApiFailure,
}

/// The call a stage makes.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<Value>,
}

impl StageRequest {
    /// Build the request for `stage` from the caller's parameters.
    ///
    /// Gas price and nonce are independent of earlier stages; gas limit and
    /// broadcast use caller-supplied bodies.
    pub fn for_stage(stage: Stage, params: &TransactionParams) -> Result<Self, ApiFailure> {
        let request = match stage {
            Stage::SignInfo => Self::post(endpoints::SIGN_INFO, &params.sign_info)?,
            Stage::GasPrice => Self::get(with_query(
                endpoints::GAS_PRICE,
                &[("chainIndex", params.chain_index.as_str())],
            )),
            Stage::GasLimit => Self::post(endpoints::GAS_LIMIT, &params.gas_limit)?,
            Stage::Nonce => Self::get(with_query(
                endpoints::NONCE,
                &[
                    ("chainIndex", params.chain_index.as_str()),
                    ("address", params.address.as_str()),
                ],
            )),
            Stage::Broadcast => Self::post(endpoints::BROADCAST_TRANSACTION, &params.broadcast)?,
        };
        Ok(request)
    }

    fn get(endpoint: String) -> Self {
        Self {
            method: Method::GET,
            endpoint,
            body: None,
        }
    }

    fn post<T: Serialize>(endpoint: &str, body: &T) -> Result<Self, ApiFailure> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiFailure::request(format!("failed to encode request body: {}", e)))?;
        Ok(Self {
            method: Method::POST,
            endpoint: endpoint.to_string(),
            body: Some(body),
        })
    }
}

/// Fail-fast driver for the five preparation stages.
pub struct TransactionPipeline<'a, A: ExchangeApi + ?Sized> {
    api: &'a A,
    state: PipelineState,
}

impl<'a, A: ExchangeApi + ?Sized> TransactionPipeline<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            state: PipelineState::Start,
        }
    }

    /// Current state; `Done` or `Aborted` after a run.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run all stages in order, stopping at the first failure.
    pub async fn run(&mut self, params: &TransactionParams) -> Result<PipelineContext, PipelineError> {
        let span = tracing::info_span!("tx_pipeline", run_id = %Uuid::new_v4());
        self.run_stages(params).instrument(span).await
    }

    async fn run_stages(&mut self, params: &TransactionParams) -> Result<PipelineContext, PipelineError> {
        self.state = PipelineState::Start;
        let mut context = PipelineContext::default();

        for stage in Stage::ALL {
            self.state = PipelineState::Running(stage);
            tracing::info!(stage = %stage, "Running stage");

            let result = match StageRequest::for_stage(stage, params) {
                Ok(req) => self.api.call(req.method, &req.endpoint, req.body).await,
                Err(failure) => ApiResult::Failure(failure),
            };

            match result {
                ApiResult::Success(payload) => {
                    tracing::debug!(stage = %stage, payload = %payload, "Stage completed");
                    context.record(stage, payload);
                }
                ApiResult::Failure(failure) => {
                    self.state = PipelineState::Aborted(stage);
                    tracing::error!(stage = %stage, error = %failure, "Pipeline aborted");
                    return Err(PipelineError { stage, failure });
                }
            }
        }

        self.state = PipelineState::Done;
        tracing::info!("Pipeline completed");
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FailureKind;
    use crate::pipeline::params::{BroadcastRequest, ExtJson, TxDraft};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every call; fails calls whose endpoint starts with `fail_on`.
    #[derive(Default)]
    struct SpyApi {
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<(Method, String, Option<Value>)>>,
    }

    impl SpyApi {
        fn failing_on(endpoint: &'static str) -> Self {
            Self {
                fail_on: Some(endpoint),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(Method, String, Option<Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExchangeApi for SpyApi {
        async fn call(&self, method: Method, endpoint: &str, body: Option<Value>) -> ApiResult {
            self.calls
                .lock()
                .unwrap()
                .push((method, endpoint.to_string(), body));
            match self.fail_on {
                Some(prefix) if endpoint.starts_with(prefix) => ApiResult::Failure(ApiFailure::new(
                    FailureKind::Application("50000".to_string()),
                    "boom",
                    None,
                )),
                _ => ApiResult::Success(json!({"code": "0", "data": [{"endpoint": endpoint}]})),
            }
        }
    }

    fn params() -> TransactionParams {
        let draft = TxDraft {
            chain_index: "1".to_string(),
            from_addr: "0xfrom".to_string(),
            to_addr: "0xto".to_string(),
            tx_amount: "100".to_string(),
            ext_json: Some(ExtJson {
                input_data: "0xdata".to_string(),
            }),
        };
        TransactionParams {
            chain_index: "1".to_string(),
            address: "0xfrom".to_string(),
            sign_info: draft.clone(),
            gas_limit: TxDraft {
                tx_amount: "200".to_string(),
                ..draft
            },
            broadcast: BroadcastRequest {
                account_id: "acct".to_string(),
                chain_index: "1".to_string(),
                address: "0xfrom".to_string(),
                signed_tx: "0x02f8".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_all_stages_succeed() {
        let api = SpyApi::default();
        let mut pipeline = TransactionPipeline::new(&api);

        let context = pipeline.run(&params()).await.unwrap();

        assert_eq!(pipeline.state(), PipelineState::Done);
        assert!(context.is_complete());
        for stage in Stage::ALL {
            assert!(context.get(stage).is_some(), "missing result for {}", stage);
        }
        assert_eq!(api.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_stage_requests_in_order() {
        let api = SpyApi::default();
        TransactionPipeline::new(&api).run(&params()).await.unwrap();

        let calls = api.calls();
        let summary: Vec<(Method, &str)> = calls.iter().map(|(m, e, _)| (m.clone(), e.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (Method::POST, "/wallet/pre-transaction/sign-info"),
                (Method::GET, "/wallet/pre-transaction/gas-price?chainIndex=1"),
                (Method::POST, "/wallet/pre-transaction/gas-limit"),
                (Method::GET, "/wallet/pre-transaction/nonce?chainIndex=1&address=0xfrom"),
                (Method::POST, "/wallet/pre-transaction/broadcast-transaction"),
            ]
        );

        assert_eq!(calls[0].2.as_ref().unwrap()["txAmount"], json!("100"));
        assert!(calls[1].2.is_none());
        assert_eq!(calls[2].2.as_ref().unwrap()["txAmount"], json!("200"));
        assert!(calls[3].2.is_none());
        assert_eq!(calls[4].2.as_ref().unwrap()["signedTx"], json!("0x02f8"));
    }

    #[tokio::test]
    async fn test_failure_stops_later_stages() {
        let cases = [
            ("/wallet/pre-transaction/sign-info", Stage::SignInfo, 1),
            ("/wallet/pre-transaction/gas-price", Stage::GasPrice, 2),
            ("/wallet/pre-transaction/gas-limit", Stage::GasLimit, 3),
            ("/wallet/pre-transaction/nonce", Stage::Nonce, 4),
            ("/wallet/pre-transaction/broadcast", Stage::Broadcast, 5),
        ];

        for (endpoint, stage, expected_calls) in cases {
            let api = SpyApi::failing_on(endpoint);
            let mut pipeline = TransactionPipeline::new(&api);

            let err = pipeline.run(&params()).await.unwrap_err();

            assert_eq!(err.stage, stage);
            assert_eq!(err.failure.message, "boom");
            assert_eq!(pipeline.state(), PipelineState::Aborted(stage));
            assert_eq!(api.calls().len(), expected_calls, "calls after failing {}", stage);
        }
    }

    #[tokio::test]
    async fn test_error_names_stage() {
        let api = SpyApi::failing_on("/wallet/pre-transaction/nonce");
        let err = TransactionPipeline::new(&api).run(&params()).await.unwrap_err();
        assert_eq!(err.to_string(), "stage nonce failed: application code 50000 error: boom");
    }

    #[tokio::test]
    async fn test_pipeline_reusable_after_abort() {
        let api = SpyApi::default();
        let mut pipeline = TransactionPipeline::new(&api);
        pipeline.state = PipelineState::Aborted(Stage::GasPrice);

        pipeline.run(&params()).await.unwrap();
        assert_eq!(pipeline.state(), PipelineState::Done);
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::SignInfo.next(), Some(Stage::GasPrice));
        assert_eq!(Stage::Nonce.next(), Some(Stage::Broadcast));
        assert_eq!(Stage::Broadcast.next(), None);
        assert_eq!(Stage::GasLimit.to_string(), "gas-limit");
    }

    #[test]
    fn test_context_record_and_count() {
        let mut context = PipelineContext::default();
        assert_eq!(context.completed(), 0);

        context.record(Stage::GasPrice, json!({"normal": "1"}));
        assert_eq!(context.completed(), 1);
        assert_eq!(context.get(Stage::GasPrice), Some(&json!({"normal": "1"})));
        assert!(context.get(Stage::Nonce).is_none());
        assert!(!context.is_complete());
    }
}

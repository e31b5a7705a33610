use std::collections::BTreeMap;

use error_stack::report;
use serde_json::Value;

use crate::{
    bag::ResponseBag,
    configs::settings::{Settings, UnknownParamPolicy},
    errors::{CustomResult, DataObjectError, DomainError},
    extractor::ResponseView,
    logger,
    types::{
        BillingExpressCheckoutGetResponse, ExpressCheckoutGetResponse, ExpressCheckoutResponse,
        TransactionResponse,
    },
};

/// Which parameter names carry the payer details of an express checkout get reply.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExpressCheckoutFields {
    /// `EMAIL`, `PHONENUM`, `FIRSTNAME`, `LASTNAME` plus the billing street address.
    Generic,
    /// `BILLTOEMAIL`, `BILLTOPHONENUM`, `BILLTOFIRSTNAME`, `BILLTOLASTNAME`.
    BillingPrefixed,
}

/// Views expected in a reply, chosen by the operation that produced it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseShape {
    Transaction,
    ExpressCheckoutGet(ExpressCheckoutFields),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExpressCheckoutDetails {
    Generic(ExpressCheckoutGetResponse),
    BillingPrefixed(BillingExpressCheckoutGetResponse),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpressCheckoutGet {
    pub common: ExpressCheckoutResponse,
    pub details: ExpressCheckoutDetails,
}

/// A gateway reply split into its views.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    transaction: TransactionResponse,
    express_checkout: Option<ExpressCheckoutGet>,
    extra_params: BTreeMap<String, Value>,
}

impl Response {
    /// Parses a raw name/value reply and routes it with [`Response::from_bag`].
    pub fn from_nvp(
        raw: &str,
        shape: ResponseShape,
        settings: &Settings,
    ) -> CustomResult<Self, DataObjectError> {
        let bag = ResponseBag::from_nvp_with(raw, settings.response.duplicate_params).map_err(
            |report| {
                let error = report.current_context().clone();
                report.change_context(DataObjectError::Domain(error))
            },
        )?;
        Self::from_bag(bag, shape, settings)
    }

    #[logger::instrument(skip_all, fields(shape = ?shape))]
    pub fn from_bag(
        mut bag: ResponseBag,
        shape: ResponseShape,
        settings: &Settings,
    ) -> CustomResult<Self, DataObjectError> {
        let transaction = TransactionResponse::from_bag(&mut bag)?;

        let express_checkout = match shape {
            ResponseShape::Transaction => None,
            ResponseShape::ExpressCheckoutGet(fields) => {
                let common = ExpressCheckoutResponse::from_bag(&mut bag)?;
                let details = match fields {
                    ExpressCheckoutFields::Generic => ExpressCheckoutDetails::Generic(
                        ExpressCheckoutGetResponse::from_bag(&mut bag)?,
                    ),
                    ExpressCheckoutFields::BillingPrefixed => {
                        ExpressCheckoutDetails::BillingPrefixed(
                            BillingExpressCheckoutGetResponse::from_bag(&mut bag)?,
                        )
                    }
                };
                Some(ExpressCheckoutGet { common, details })
            }
        };

        let extra_params = match settings.response.unknown_params {
            UnknownParamPolicy::Retain => bag.into_inner(),
            UnknownParamPolicy::Ignore => {
                if !bag.is_empty() {
                    logger::debug!(
                        params = ?bag.keys().collect::<Vec<_>>(),
                        "Dropping unrecognized response parameters"
                    );
                }
                BTreeMap::new()
            }
            UnknownParamPolicy::Reject if !bag.is_empty() => {
                let keys = bag.keys().map(str::to_owned).collect();
                return Err(report!(DataObjectError::Domain(
                    DomainError::UnrecognizedParams { keys }
                )));
            }
            UnknownParamPolicy::Reject => BTreeMap::new(),
        };

        Ok(Self {
            transaction,
            express_checkout,
            extra_params,
        })
    }

    pub fn transaction(&self) -> &TransactionResponse {
        &self.transaction
    }

    pub fn express_checkout(&self) -> Option<&ExpressCheckoutGet> {
        self.express_checkout.as_ref()
    }

    /// Parameters no view claimed. Empty unless unknown parameters are retained.
    pub fn extra_params(&self) -> &BTreeMap<String, Value> {
        &self.extra_params
    }

    pub fn extra_param(&self, key: &str) -> Option<&Value> {
        self.extra_params.get(key)
    }
}

/// Well-known Payflow response parameter names.
///
/// The string form of each variant is the exact key used on the wire, so
/// `ParamKey::PayerId.as_str()` is `"PAYERID"`.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ParamKey {
    // Transaction
    Result,
    Ppref,
    Pnref,
    RespMsg,
    AuthCode,
    AvsAddr,
    AvsZip,
    CardSecure,
    Cvv2Match,
    Iavs,
    OrigResult,
    TransState,
    CustRef,
    StartTime,
    EndTime,
    Duplicate,
    #[strum(serialize = "DATE_TO_SETTLE")]
    DateToSettle,
    BatchId,
    AddlMsgs,
    RespText,
    ProcAvs,
    ProcCardSecure,
    ProcCvv2,
    HostCode,
    #[strum(serialize = "SETTLE_DATE")]
    SettleDate,
    OrigPnref,
    FeeAmt,
    PendingReason,
    PaymentType,
    CorrelationId,
    Status,
    BalAmt,
    AmexId,
    AmexPosData,
    Acct,
    Amt,
    TransTime,
    ExpDate,
    CardType,
    OrigAmt,
    SecureToken,
    SecureTokenId,
    PhoneMatch,
    EmailMatch,
    ExtRspMsg,
    PaymentAdviceCode,
    AssociationRespCode,
    TransactionId,
    MagtResponse,
    TraceId,
    AchStatus,
    Type,
    Affluent,
    CcUpdated,
    TxId,

    // Express checkout
    Token,
    Email,
    PayerId,
    PayerStatus,
    FirstName,
    LastName,
    ShipToName,
    ShipToFirstName,
    ShipToLastName,
    ShipToCountry,
    ShipToBusiness,
    AddrStatus,
    ShipToStreet,
    ShipToStreet2,
    ShipToCity,
    ShipToState,
    ShipToZip,
    CountryCode,
    PhoneNum,
    #[strum(serialize = "BA_FLAG")]
    BaFlag,
    Street,
    Street2,
    City,
    State,
    Zip,

    // Billing-prefixed express checkout
    BillToEmail,
    BillToPhoneNum,
    BillToFirstName,
    BillToLastName,
}

impl ParamKey {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Lowest RESULT code the gateway uses for approved or declined transactions.
/// Anything below it is a communication failure reported by the SDK layer.
pub const MIN_GATEWAY_RESULT: i32 = 0;

pub const ENV_PREFIX: &str = "PAYFLOW";
pub const ENV_SEPARATOR: &str = "__";

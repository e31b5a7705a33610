use error_stack::{report, IntoReport, ResultExt};

use crate::{
    consts::{self, ParamKey},
    errors::{CustomResult, DataObjectError, DomainError, FieldResultExt},
};

response_view! {
    /// Core outcome of a transaction, present in every gateway reply.
    pub struct TransactionResponse {
        /// `RESULT`. Zero means approved; positive values are gateway declines or
        /// errors; negative values are communication failures.
        result: Result as i32 => parse_result,
        /// `PPREF`, the PayPal transaction id.
        ppref: Ppref,
        /// `PNREF`, the gateway transaction id.
        pnref: Pnref,
        resp_msg: RespMsg,
        auth_code: AuthCode,
        avs_addr: AvsAddr,
        avs_zip: AvsZip,
        card_secure: CardSecure,
        cvv2_match: Cvv2Match,
        /// `IAVS`, whether the address was verified outside the US.
        iavs: Iavs,
        orig_result: OrigResult,
        trans_state: TransState,
        cust_ref: CustRef,
        start_time: StartTime,
        end_time: EndTime,
        /// `DUPLICATE`. `1` when the gateway already saw this request id.
        duplicate: Duplicate,
        date_to_settle: DateToSettle,
        batch_id: BatchId,
        addl_msgs: AddlMsgs,
        resp_text: RespText,
        proc_avs: ProcAvs,
        proc_card_secure: ProcCardSecure,
        proc_cvv2: ProcCvv2,
        host_code: HostCode,
        settle_date: SettleDate,
        orig_pnref: OrigPnref,
        fee_amt: FeeAmt,
        pending_reason: PendingReason,
        payment_type: PaymentType,
        correlation_id: CorrelationId,
        status: Status,
        bal_amt: BalAmt,
        amex_id: AmexId,
        amex_pos_data: AmexPosData,
        /// `ACCT`, the masked account number.
        acct: Acct,
        amt: Amt,
        trans_time: TransTime,
        exp_date: ExpDate,
        card_type: CardType,
        orig_amt: OrigAmt,
        secure_token: SecureToken,
        secure_token_id: SecureTokenId,
        phone_match: PhoneMatch,
        email_match: EmailMatch,
        ext_rsp_msg: ExtRspMsg,
        payment_advice_code: PaymentAdviceCode,
        association_resp_code: AssociationRespCode,
        transaction_id: TransactionId,
        magt_response: MagtResponse,
        trace_id: TraceId,
        ach_status: AchStatus,
        /// `TYPE`, the transaction type echoed back by the gateway.
        transaction_type: Type,
        affluent: Affluent,
        cc_updated: CcUpdated,
        tx_id: TxId,
    }
}

impl TransactionResponse {
    pub fn is_approved(&self) -> bool {
        self.result == Some(0)
    }

    /// Whether `RESULT` reports that the gateway was never reached.
    pub fn is_communication_failure(&self) -> bool {
        self.result
            .map_or(false, |code| code < consts::MIN_GATEWAY_RESULT)
    }

    /// Raises [`DomainError::CommunicationFailure`] for a negative `RESULT`. The
    /// reply itself stays readable.
    pub fn ensure_connected(&self) -> CustomResult<(), DomainError> {
        match self.result {
            Some(code) if code < consts::MIN_GATEWAY_RESULT => {
                Err(report!(DomainError::CommunicationFailure { code }))
                    .attach_printable_lazy(|| format!("RESPMSG: {:?}", self.resp_msg))
            }
            _ => Ok(()),
        }
    }
}

fn parse_result(value: String) -> CustomResult<i32, DataObjectError> {
    value
        .trim()
        .parse::<i32>()
        .into_report()
        .attach_printable_lazy(|| format!("RESULT is not an integer: {value:?}"))
        .classify_field(ParamKey::Result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::{bag::ResponseBag, extractor::ResponseView};

    #[test]
    fn approved_sale() {
        let mut bag = ResponseBag::from_nvp(
            "RESULT=0&PNREF=V53A0A30B542&RESPMSG=Approved&AUTHCODE=010101&AVSADDR=Y&AVSZIP=N\
             &CVV2MATCH=Y&IAVS=N&CUSTREF=INV-7&ACCT=1111&EXPDATE=1225&CARDTYPE=0\
             &SECURETOKEN=T1&SECURETOKENID=TID1&EMAILMATCH=Y&PHONEMATCH=N&EXTRSPMSG=0000\
             &ADDLMSGS=ok&SETTLE_DATE=2024-01-02&BALAMT=10.00&TRACEID=TR1&ACHSTATUS=A\
             &TXID=X1&PROCCVV2=M&DATE_TO_SETTLE=2024-01-03&TYPE=S&ORIGAMT=12.50&TOKEN=EC-1",
        )
        .unwrap();
        let response = TransactionResponse::from_bag(&mut bag).unwrap();

        assert!(response.is_approved());
        assert!(!response.is_communication_failure());
        assert_eq!(response.pnref(), Some("V53A0A30B542"));
        assert_eq!(response.auth_code(), Some("010101"));
        assert_eq!(response.avs_zip(), Some("N"));
        assert_eq!(response.cust_ref(), Some("INV-7"));
        assert_eq!(response.acct(), Some("1111"));
        assert_eq!(response.exp_date(), Some("1225"));
        assert_eq!(response.card_type(), Some("0"));
        assert_eq!(response.secure_token(), Some("T1"));
        assert_eq!(response.secure_token_id(), Some("TID1"));
        assert_eq!(response.email_match(), Some("Y"));
        assert_eq!(response.phone_match(), Some("N"));
        assert_eq!(response.ext_rsp_msg(), Some("0000"));
        assert_eq!(response.addl_msgs(), Some("ok"));
        assert_eq!(response.settle_date(), Some("2024-01-02"));
        assert_eq!(response.bal_amt(), Some("10.00"));
        assert_eq!(response.trace_id(), Some("TR1"));
        assert_eq!(response.ach_status(), Some("A"));
        assert_eq!(response.tx_id(), Some("X1"));
        assert_eq!(response.proc_cvv2(), Some("M"));
        assert_eq!(response.date_to_settle(), Some("2024-01-03"));
        assert_eq!(response.transaction_type(), Some("S"));
        assert_eq!(response.orig_amt(), Some("12.50"));
        assert_eq!(response.ppref(), None);
        assert_eq!(bag.keys().collect::<Vec<_>>(), ["TOKEN"]);
    }

    #[test]
    fn every_claimed_param_is_consumed() {
        let mut bag: ResponseBag = TransactionResponse::param_keys()
            .into_iter()
            .map(|key| (key.as_str(), if key == ParamKey::Result { "0" } else { "v" }))
            .chain([("EMAIL", "kept")])
            .collect();
        let response = TransactionResponse::from_bag(&mut bag).unwrap();

        assert!(response.is_approved());
        assert_eq!(response.magt_response(), Some("v"));
        assert_eq!(response.cc_updated(), Some("v"));
        assert_eq!(bag.keys().collect::<Vec<_>>(), ["EMAIL"]);
    }

    #[test]
    fn declined_result_is_not_an_error() {
        let mut bag = ResponseBag::from_nvp("RESULT=12&RESPMSG=Declined").unwrap();
        let response = TransactionResponse::from_bag(&mut bag).unwrap();
        assert_eq!(response.result(), Some(12));
        assert!(!response.is_approved());
        assert!(response.ensure_connected().is_ok());
    }

    #[test]
    fn negative_result_keeps_the_reply_readable() {
        let mut bag =
            ResponseBag::from_nvp("RESULT=-32&RESPMSG=Failed to connect to host&PNREF=V1")
                .unwrap();
        let response = TransactionResponse::from_bag(&mut bag).unwrap();

        assert_eq!(response.result(), Some(-32));
        assert!(response.is_communication_failure());
        assert_eq!(response.resp_msg(), Some("Failed to connect to host"));
        assert_eq!(response.pnref(), Some("V1"));
        assert!(bag.is_empty());

        let report = response.ensure_connected().unwrap_err();
        assert_eq!(
            report.current_context(),
            &DomainError::CommunicationFailure { code: -32 }
        );
    }

    #[test]
    fn non_numeric_result_is_a_mapping_error() {
        let mut bag = ResponseBag::from_nvp("RESULT=ok").unwrap();
        let report = TransactionResponse::from_bag(&mut bag).unwrap_err();
        assert_eq!(
            report.current_context(),
            &DataObjectError::Mapping {
                key: ParamKey::Result
            }
        );
        assert!(bag.contains_key("RESULT"));
    }

    #[test]
    fn missing_result_stays_unset() {
        let mut bag = ResponseBag::from_nvp("PNREF=V1").unwrap();
        let response = TransactionResponse::from_bag(&mut bag).unwrap();
        assert_eq!(response.result(), None);
        assert!(!response.is_approved());
        assert!(!response.is_communication_failure());
    }
}

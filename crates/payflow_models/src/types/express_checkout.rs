response_view! {
    /// Parameters shared by every express checkout reply.
    pub struct ExpressCheckoutResponse {
        /// `TOKEN`
        token: Token,
    }
}

response_view! {
    /// Payer and shipping details returned by an express checkout get operation.
    pub struct ExpressCheckoutGetResponse {
        /// `EMAIL`
        email: Email,
        /// `PAYERID`
        payer_id: PayerId,
        /// `PAYERSTATUS`
        payer_status: PayerStatus,
        /// `FIRSTNAME`
        first_name: FirstName,
        /// `LASTNAME`
        last_name: LastName,
        /// `SHIPTONAME`
        ship_to_name: ShipToName,
        /// `SHIPTOFIRSTNAME`
        ship_to_first_name: ShipToFirstName,
        /// `SHIPTOLASTNAME`
        ship_to_last_name: ShipToLastName,
        /// `SHIPTOCOUNTRY`
        ship_to_country: ShipToCountry,
        /// `SHIPTOBUSINESS`
        ship_to_business: ShipToBusiness,
        /// `ADDRSTATUS`
        address_status: AddrStatus,
        /// `SHIPTOSTREET`
        ship_to_street: ShipToStreet,
        /// `SHIPTOSTREET2`
        ship_to_street2: ShipToStreet2,
        /// `SHIPTOCITY`
        ship_to_city: ShipToCity,
        /// `SHIPTOSTATE`
        ship_to_state: ShipToState,
        /// `SHIPTOZIP`
        ship_to_zip: ShipToZip,
        /// `COUNTRYCODE`
        country_code: CountryCode,
        /// `PHONENUM`
        phone_num: PhoneNum,
        /// `BA_FLAG`, set when a billing agreement was accepted.
        ba_flag: BaFlag,
        /// `STREET`
        street: Street,
        /// `STREET2`
        street2: Street2,
        /// `CITY`
        city: City,
        /// `STATE`
        state: State,
        /// `ZIP`
        zip: Zip,
    }
}

response_view! {
    /// Express checkout get reply using the `BILLTO`-prefixed payer parameters.
    ///
    /// Carries no billing street address.
    pub struct BillingExpressCheckoutGetResponse {
        /// `BILLTOEMAIL`
        email: BillToEmail,
        /// `PAYERID`
        payer_id: PayerId,
        /// `PAYERSTATUS`
        payer_status: PayerStatus,
        /// `BILLTOFIRSTNAME`
        first_name: BillToFirstName,
        /// `BILLTOLASTNAME`
        last_name: BillToLastName,
        /// `SHIPTONAME`
        ship_to_name: ShipToName,
        /// `SHIPTOFIRSTNAME`
        ship_to_first_name: ShipToFirstName,
        /// `SHIPTOLASTNAME`
        ship_to_last_name: ShipToLastName,
        /// `SHIPTOCOUNTRY`
        ship_to_country: ShipToCountry,
        /// `SHIPTOBUSINESS`
        ship_to_business: ShipToBusiness,
        /// `ADDRSTATUS`
        address_status: AddrStatus,
        /// `SHIPTOSTREET`
        ship_to_street: ShipToStreet,
        /// `SHIPTOSTREET2`
        ship_to_street2: ShipToStreet2,
        /// `SHIPTOCITY`
        ship_to_city: ShipToCity,
        /// `SHIPTOSTATE`
        ship_to_state: ShipToState,
        /// `SHIPTOZIP`
        ship_to_zip: ShipToZip,
        /// `COUNTRYCODE`
        country_code: CountryCode,
        /// `BILLTOPHONENUM`
        phone_num: BillToPhoneNum,
        /// `BA_FLAG`
        ba_flag: BaFlag,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use serde_json::json;

    use super::*;
    use crate::{
        bag::ResponseBag,
        errors::DataObjectError,
        extractor::ResponseView,
        ParamKey,
    };

    fn bag(pairs: &[(&str, &str)]) -> ResponseBag {
        pairs.iter().copied().collect()
    }

    #[test]
    fn generic_view_takes_its_params() {
        let mut bag = bag(&[
            ("EMAIL", "a@b.com"),
            ("PAYERID", "P1"),
            ("PHONENUM", "555-1111"),
            ("RESULT", "0"),
            ("CUSTOM", "kept"),
        ]);
        let view = ExpressCheckoutGetResponse::from_bag(&mut bag).unwrap();

        assert_eq!(view.email(), Some("a@b.com"));
        assert_eq!(view.payer_id(), Some("P1"));
        assert_eq!(view.phone_num(), Some("555-1111"));
        assert_eq!(view.ship_to_city(), None);
        assert_eq!(bag.keys().collect::<Vec<_>>(), ["CUSTOM", "RESULT"]);
    }

    #[test]
    fn billing_view_reads_prefixed_params() {
        let mut bag = bag(&[
            ("BILLTOEMAIL", "x@y.com"),
            ("BILLTOFIRSTNAME", "Jo"),
            ("EMAIL", "ignored@y.com"),
        ]);
        let view = BillingExpressCheckoutGetResponse::from_bag(&mut bag).unwrap();

        assert_eq!(view.email(), Some("x@y.com"));
        assert_eq!(view.first_name(), Some("Jo"));
        assert_eq!(view.last_name(), None);
        assert_eq!(bag.keys().collect::<Vec<_>>(), ["EMAIL"]);
    }

    #[test]
    fn billing_view_has_no_street_address() {
        let keys = BillingExpressCheckoutGetResponse::param_keys();
        for key in [
            ParamKey::Street,
            ParamKey::Street2,
            ParamKey::City,
            ParamKey::State,
            ParamKey::Zip,
            ParamKey::Email,
        ] {
            assert!(!keys.contains(&key), "{key} should not be claimed");
        }
        assert_eq!(ExpressCheckoutGetResponse::param_keys().len(), keys.len() + 5);
    }

    #[test]
    fn every_claimed_param_is_consumed() {
        let keys = ExpressCheckoutGetResponse::param_keys();
        let mut bag: ResponseBag = keys
            .iter()
            .map(|key| (key.as_str(), format!("value-of-{key}")))
            .collect();
        let view = ExpressCheckoutGetResponse::from_bag(&mut bag).unwrap();

        assert!(bag.is_empty());
        assert_eq!(view.ba_flag(), Some("value-of-BA_FLAG"));
        assert_eq!(view.ship_to_street2(), Some("value-of-SHIPTOSTREET2"));
        assert_eq!(view.zip(), Some("value-of-ZIP"));
    }

    #[test]
    fn every_billing_param_is_consumed() {
        let keys = BillingExpressCheckoutGetResponse::param_keys();
        assert_eq!(keys.len(), 19);
        let mut bag: ResponseBag = keys
            .iter()
            .map(|key| (key.to_string(), format!("value-of-{key}")))
            .chain([("STREET".to_owned(), "kept".to_owned())])
            .collect();
        let view = BillingExpressCheckoutGetResponse::from_bag(&mut bag).unwrap();

        assert_eq!(bag.keys().collect::<Vec<_>>(), ["STREET"]);
        assert_eq!(view.email(), Some("value-of-BILLTOEMAIL"));
        assert_eq!(view.phone_num(), Some("value-of-BILLTOPHONENUM"));
        assert_eq!(view.last_name(), Some("value-of-BILLTOLASTNAME"));
        assert_eq!(view.ship_to_zip(), Some("value-of-SHIPTOZIP"));
    }

    #[test]
    fn null_json_value_reads_as_unset() {
        let mut bag =
            ResponseBag::from_json(json!({ "EMAIL": null, "PAYERID": "P1" })).unwrap();
        let view = ExpressCheckoutGetResponse::from_bag(&mut bag).unwrap();

        assert_eq!(view.email(), None);
        assert_eq!(view.payer_id(), Some("P1"));
        assert!(bag.is_empty());
    }

    #[test]
    fn non_text_value_fails_the_view() {
        let mut bag = ResponseBag::new();
        bag.insert("TOKEN", json!({ "id": "EC-1" }));
        let report = ExpressCheckoutResponse::from_bag(&mut bag).unwrap_err();
        assert_eq!(
            report.current_context(),
            &DataObjectError::Mapping {
                key: ParamKey::Token
            }
        );
    }

    #[test]
    fn serializes_unset_fields_as_null() {
        let mut bag = bag(&[("TOKEN", "EC-17C76533PL706494P")]);
        let view = ExpressCheckoutResponse::from_bag(&mut bag).unwrap();
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({ "token": "EC-17C76533PL706494P" })
        );

        let empty = ExpressCheckoutResponse::from_bag(&mut bag).unwrap();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({ "token": null }));
    }
}

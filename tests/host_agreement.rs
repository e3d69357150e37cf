// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The JSON, Option and realm hosts must classify the same data the same way

use octofhir_typeguard::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case::null(json!(null))]
#[case::boolean(json!(false))]
#[case::zero(json!(0))]
#[case::float(json!(1.5))]
#[case::empty_string(json!(""))]
#[case::string(json!("a"))]
#[case::empty_array(json!([]))]
#[case::nested_array(json!([[1], {"a": null}]))]
#[case::empty_object(json!({}))]
#[case::array_like(json!({"length": 0}))]
fn test_json_and_realm_agree(#[case] document: Value) {
    let mut realm = Realm::new();
    let value = realm.import_json(&document);

    assert_eq!(classify(&document), classify(&realm.bind(&value)));
}

#[test]
fn test_missing_property_is_undefined() {
    let document = json!({"name": "x"});
    let missing = document.get("age");
    let present = document.get("name");

    assert!(!is_undefined(&missing));
    assert!(is_undefined(&present));
    assert!(is_string(&present));
    assert_eq!(classify(&missing).to_string_tag, "[object Undefined]");
    assert_eq!(classify(&missing).type_tag, TypeTag::Undefined);
}

#[test]
fn test_pointer_miss_matches_realm_undefined() {
    let document = json!({"a": {"b": [1, 2]}});
    let realm = Realm::new();

    assert_eq!(
        classify(&document.pointer("/a/c")),
        classify(&realm.bind(&JsValue::Undefined))
    );
    assert!(is_array(&document.pointer("/a/b")));
    assert!(is_plain_object(&document.pointer("/a")));
}

#[test]
fn test_json_never_yields_functions() {
    let document = json!({"f": "function () {}"});
    for predicate in [Predicate::IsFunction, Predicate::IsArray] {
        assert!(!predicate.evaluate(&document));
        assert!(!predicate.evaluate(&document["f"]));
    }
}

#[test]
fn test_registry_lookup_drives_evaluation() {
    let document = json!([1, 2, 3]);
    let predicate: Predicate = "isArray".parse().unwrap();
    assert!(predicate.evaluate(&document));

    let predicate: Predicate = "is_plain_object".parse().unwrap();
    assert!(!predicate.evaluate(&document));

    assert!("isNumber".parse::<Predicate>().is_err());
}

// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! An in-memory stand-in for the Cosmos DB gateway.
//!
//! It checks request signatures, keeps databases, collections, documents and offers in memory,
//! and answers with the status codes, error bodies and headers the real service uses.

use async_trait::async_trait;
use azure_data::constants;
use azure_data::http::{Headers, HttpClient, Method, RawResponse, Request, StatusCode};
use azure_data::models::PartitionKeyDefinition;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::percent_decode_str;
use serde_json::{json, Map, Value};
use sha2::Sha256;
use std::sync::Mutex;

pub const DEFAULT_THROUGHPUT: u32 = 400;

#[derive(Debug)]
pub struct MockCosmosService {
    key: Vec<u8>,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    databases: Vec<StoredDatabase>,
    offers: Vec<Value>,
    requests: Vec<Request>,
    counter: u64,
    lsn: u64,
}

#[derive(Debug)]
struct StoredDatabase {
    body: Value,
    collections: Vec<StoredCollection>,
}

#[derive(Debug)]
struct StoredCollection {
    body: Value,
    partition_key: Option<PartitionKeyDefinition>,
    documents: Vec<StoredDocument>,
}

#[derive(Debug)]
struct StoredDocument {
    body: Value,
    partition_key: Value,
}

struct Reply {
    status: StatusCode,
    body: Option<Value>,
    headers: Vec<(&'static str, String)>,
}

/// `Err` carries the error reply, so handlers can use `?`.
type Handled = Result<Reply, Reply>;

impl Reply {
    fn json(status: StatusCode, body: Value) -> Self {
        Reply {
            status,
            body: Some(body),
            headers: Vec::new(),
        }
    }

    fn empty(status: StatusCode) -> Self {
        Reply {
            status,
            body: None,
            headers: Vec::new(),
        }
    }

    fn error(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Reply::json(status, json!({ "code": code, "message": message.into() }))
    }

    fn header(mut self, name: &'static str, value: impl ToString) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    fn into_raw(self, session_token: Option<String>) -> RawResponse {
        let mut headers = Headers::new();
        headers.insert(constants::REQUEST_CHARGE, "1.24");
        headers.insert(
            constants::ACTIVITY_ID,
            uuid::Uuid::new_v4().hyphenated().to_string(),
        );
        if let Some(token) = session_token {
            headers.insert(constants::SESSION_TOKEN, token);
        }
        if let Some(etag) = self
            .body
            .as_ref()
            .and_then(|b| b.get("_etag"))
            .and_then(Value::as_str)
        {
            headers.insert(constants::ETAG, etag);
        }
        for (name, value) in self.headers {
            headers.insert(name, value);
        }

        let body = match &self.body {
            Some(body) => {
                headers.insert(constants::CONTENT_TYPE, constants::APPLICATION_JSON);
                serde_json::to_vec(body).unwrap()
            }
            None => Vec::new(),
        };
        RawResponse::new(self.status, headers, body)
    }
}

fn bad_request(message: impl Into<String>) -> Reply {
    Reply::error(StatusCode::BAD_REQUEST, "BadRequest", message)
}

fn not_found() -> Reply {
    Reply::error(
        StatusCode::NOT_FOUND,
        "NotFound",
        "Entity with the specified id does not exist in the system.",
    )
}

fn conflict() -> Reply {
    Reply::error(
        StatusCode::CONFLICT,
        "Conflict",
        "Resource with specified id or name already exists.",
    )
}

fn id_of(body: &Value) -> &str {
    body.get("id").and_then(Value::as_str).unwrap_or_default()
}

fn self_link_of(body: &Value) -> String {
    body.get("_self")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn header_is_true(request: &Request, name: &str) -> bool {
    request
        .headers()
        .get_optional_str(name)
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn json_body(request: &Request) -> Result<Map<String, Value>, Reply> {
    match serde_json::from_slice(request.body()) {
        Ok(Value::Object(body)) => Ok(body),
        _ => Err(bad_request("The request body is not a JSON object.")),
    }
}

fn required_id(body: &Map<String, Value>) -> Result<String, Reply> {
    match body.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(bad_request("The input content is invalid because the required property, 'id', is missing.")),
    }
}

fn offer_throughput(request: &Request) -> Result<Option<u32>, Reply> {
    match request.headers().get_optional_str(constants::OFFER_THROUGHPUT) {
        None => Ok(None),
        Some(value) => match value.parse::<u32>() {
            Ok(throughput)
                if (constants::MIN_THROUGHPUT..=constants::MAX_THROUGHPUT).contains(&throughput)
                    && throughput % constants::THROUGHPUT_INCREMENT == 0 =>
            {
                Ok(Some(throughput))
            }
            _ => Err(bad_request(format!(
                "The Offer Throughput value '{value}' must be between {} and {} and a multiple of {}.",
                constants::MIN_THROUGHPUT,
                constants::MAX_THROUGHPUT,
                constants::THROUGHPUT_INCREMENT
            ))),
        },
    }
}

/// Stamps the system properties of a new version of a resource.
fn stamp(body: &mut Map<String, Value>, rid: &str, self_prefix: &str, version: u64) {
    body.insert("_rid".into(), json!(rid));
    body.insert("_self".into(), json!(format!("{self_prefix}{rid}/")));
    body.insert(
        "_etag".into(),
        json!(format!("\"{version:08x}-0000-0000-0000-000000000000\"")),
    );
    body.insert("_ts".into(), json!(1_700_000_000 + version));
}

fn default_indexing_policy() -> Value {
    json!({
        "indexingMode": "consistent",
        "automatic": true,
        "includedPaths": [{
            "path": "/*",
            "indexes": [
                { "kind": "Range", "dataType": "Number", "precision": -1 },
                { "kind": "Range", "dataType": "String", "precision": -1 },
                { "kind": "Spatial", "dataType": "Point" }
            ]
        }],
        "excludedPaths": [{ "path": "/\"_etag\"/?" }]
    })
}

/// The service stores policies in its own order; reversing paths and indexes mimics that.
fn reorder_policy(mut policy: Value) -> Value {
    if let Some(paths) = policy.get_mut("includedPaths").and_then(Value::as_array_mut) {
        paths.reverse();
        for path in paths.iter_mut() {
            if let Some(indexes) = path.get_mut("indexes").and_then(Value::as_array_mut) {
                indexes.reverse();
            }
        }
    }
    policy
}

fn partition_key_range() -> Value {
    json!({
        "id": "0",
        "_rid": "pkrange0",
        "minInclusive": "",
        "maxExclusive": "FF",
        "ridPrefix": 0,
        "throughputFraction": 1.0,
        "status": "online",
        "parents": []
    })
}

/// Checks the partition key header of a write against the document's own value.
fn validated_partition_key(
    request: &Request,
    definition: Option<&PartitionKeyDefinition>,
    document: &Value,
) -> Result<Value, Reply> {
    let supplied = supplied_partition_key(request, definition)?;
    let Some(definition) = definition else {
        return Ok(supplied);
    };
    let extracted = definition
        .extract(document)
        .map(|pk| Value::Array(pk.values().to_vec()))
        .unwrap_or_else(|| json!([{}]));
    if supplied == extracted {
        Ok(supplied)
    } else {
        Err(bad_request(
            "PartitionKey extracted from document doesn't match the one specified in the header.",
        ))
    }
}

fn supplied_partition_key(
    request: &Request,
    definition: Option<&PartitionKeyDefinition>,
) -> Result<Value, Reply> {
    match request.headers().get_optional_str(constants::PARTITION_KEY) {
        Some(header) => serde_json::from_str::<Value>(header)
            .ok()
            .filter(Value::is_array)
            .ok_or_else(|| {
                bad_request("The partition key supplied in x-ms-partitionkey header has an invalid format.")
            }),
        None if definition.is_some() => Err(bad_request(
            "PartitionKey value must be supplied for this operation.",
        )),
        None => Ok(Value::Null),
    }
}

/// Honors `If-None-Match` on reads.
fn conditional_read(request: &Request, body: &Value) -> Handled {
    let etag = body.get("_etag").and_then(Value::as_str);
    if etag.is_some() && request.headers().get_optional_str(constants::IF_NONE_MATCH) == etag {
        return Ok(Reply::empty(StatusCode::NOT_MODIFIED));
    }
    Ok(Reply::json(StatusCode::OK, body.clone()))
}

/// Returns the slice of `items` selected by `x-ms-max-item-count` and `x-ms-continuation`.
fn page(request: &Request, name: &str, items: Vec<Value>) -> Handled {
    let headers = request.headers();
    let start = match headers.get_optional_str(constants::CONTINUATION) {
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| bad_request("Invalid continuation token."))?,
        None => 0,
    }
    .min(items.len());
    let end = headers
        .get_optional_as::<i64>(constants::MAX_ITEM_COUNT)
        .filter(|max| *max > 0)
        .map_or(items.len(), |max| (start + max as usize).min(items.len()));

    let page = items[start..end].to_vec();
    let count = page.len();
    let mut body = Map::new();
    body.insert("_rid".into(), json!(""));
    body.insert(name.into(), Value::Array(page));
    body.insert("_count".into(), json!(count));

    let mut reply = Reply::json(StatusCode::OK, Value::Object(body)).header(constants::ITEM_COUNT, count);
    if end < items.len() {
        reply = reply.header(constants::CONTINUATION, end);
    }
    Ok(reply)
}

/// The `WHERE alias.path = value` clause of a `SELECT *` query, if any.
struct Filter(Option<(Vec<String>, Value)>);

impl Filter {
    fn parse(request: &Request) -> Result<Filter, Reply> {
        if request.headers().get_optional_str(constants::CONTENT_TYPE)
            != Some(constants::APPLICATION_QUERY_JSON)
        {
            return Err(bad_request("Queries must be sent as application/query+json."));
        }
        let query: Value = serde_json::from_slice(request.body())
            .map_err(|_| bad_request("The query body is not valid JSON."))?;
        let text = query
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| bad_request("The query text is missing."))?;

        let lower = text.to_ascii_lowercase();
        if !lower.starts_with("select * from ") {
            return Err(bad_request(format!("Syntax error near '{text}'.")));
        }
        let Some(at) = lower.find(" where ") else {
            return Ok(Filter(None));
        };
        let (lhs, rhs) = text[at + " where ".len()..]
            .split_once('=')
            .ok_or_else(|| bad_request(format!("Syntax error near '{text}'.")))?;

        let path = lhs.trim().split('.').skip(1).map(str::to_string).collect();
        let rhs = rhs.trim();
        let expected = if rhs.starts_with('@') {
            query
                .get("parameters")
                .and_then(Value::as_array)
                .and_then(|ps| ps.iter().find(|p| p["name"] == rhs))
                .map(|p| p["value"].clone())
                .ok_or_else(|| bad_request(format!("The parameter {rhs} is not defined.")))?
        } else if let Some(literal) = rhs.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
            Value::String(literal.to_string())
        } else {
            serde_json::from_str(rhs).map_err(|_| bad_request(format!("Syntax error near '{rhs}'.")))?
        };
        Ok(Filter(Some((path, expected))))
    }

    fn matches(&self, item: &Value) -> bool {
        match &self.0 {
            None => true,
            Some((path, expected)) => {
                path.iter().try_fold(item, |value, segment| value.get(segment)) == Some(expected)
            }
        }
    }
}

impl State {
    fn next(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    fn database(&self, id: &str) -> Result<&StoredDatabase, Reply> {
        self.databases
            .iter()
            .find(|d| id_of(&d.body) == id)
            .ok_or_else(not_found)
    }

    fn database_mut(&mut self, id: &str) -> Result<&mut StoredDatabase, Reply> {
        self.databases
            .iter_mut()
            .find(|d| id_of(&d.body) == id)
            .ok_or_else(not_found)
    }

    fn collection(&self, db: &str, coll: &str) -> Result<&StoredCollection, Reply> {
        self.database(db)?
            .collections
            .iter()
            .find(|c| id_of(&c.body) == coll)
            .ok_or_else(not_found)
    }

    fn collection_mut(&mut self, db: &str, coll: &str) -> Result<&mut StoredCollection, Reply> {
        self.database_mut(db)?
            .collections
            .iter_mut()
            .find(|c| id_of(&c.body) == coll)
            .ok_or_else(not_found)
    }

    fn route(&mut self, request: &Request, segments: &[&str]) -> Handled {
        match (request.method(), segments) {
            (Method::Get, ["dbs"]) => {
                let items = self.databases.iter().map(|d| d.body.clone()).collect();
                page(request, "Databases", items)
            }
            (Method::Post, ["dbs"]) => self.create_database(request),
            (Method::Get, ["dbs", db]) => conditional_read(request, &self.database(db)?.body),
            (Method::Delete, ["dbs", db]) => self.delete_database(db),
            (Method::Get, ["dbs", db, "colls"]) => {
                let items = self
                    .database(db)?
                    .collections
                    .iter()
                    .map(|c| c.body.clone())
                    .collect();
                page(request, "DocumentCollections", items)
            }
            (Method::Post, ["dbs", db, "colls"]) => self.create_collection(request, db),
            (Method::Get, ["dbs", db, "colls", coll]) => {
                conditional_read(request, &self.collection(db, coll)?.body)
            }
            (Method::Put, ["dbs", db, "colls", coll]) => self.replace_collection(request, db, coll),
            (Method::Delete, ["dbs", db, "colls", coll]) => self.delete_collection(db, coll),
            (Method::Get, ["dbs", db, "colls", coll, "pkranges"]) => {
                self.collection(db, coll)?;
                page(request, "PartitionKeyRanges", vec![partition_key_range()])
            }
            (Method::Get, ["dbs", db, "colls", coll, "docs"]) => {
                let items = self
                    .collection(db, coll)?
                    .documents
                    .iter()
                    .map(|d| d.body.clone())
                    .collect();
                page(request, "Documents", items)
            }
            (Method::Post, ["dbs", db, "colls", coll, "docs"])
                if header_is_true(request, constants::IS_QUERY) =>
            {
                self.query_documents(request, db, coll)
            }
            (Method::Post, ["dbs", db, "colls", coll, "docs"]) => {
                self.create_document(request, db, coll)
            }
            (Method::Get, ["dbs", db, "colls", coll, "docs", doc]) => {
                let collection = self.collection(db, coll)?;
                let partition_key =
                    supplied_partition_key(request, collection.partition_key.as_ref())?;
                let document = collection
                    .documents
                    .iter()
                    .find(|d| id_of(&d.body) == *doc && d.partition_key == partition_key)
                    .ok_or_else(not_found)?;
                conditional_read(request, &document.body)
            }
            (Method::Put, ["dbs", db, "colls", coll, "docs", doc]) => {
                self.replace_document(request, db, coll, doc)
            }
            (Method::Delete, ["dbs", db, "colls", coll, "docs", doc]) => {
                self.delete_document(request, db, coll, doc)
            }
            (Method::Get, ["offers"]) => page(request, "Offers", self.offers.clone()),
            (Method::Post, ["offers"]) if header_is_true(request, constants::IS_QUERY) => {
                let filter = Filter::parse(request)?;
                let items = self
                    .offers
                    .iter()
                    .filter(|o| filter.matches(o))
                    .cloned()
                    .collect();
                page(request, "Offers", items)
            }
            _ => Err(bad_request(format!(
                "{} /{} is not supported.",
                request.method(),
                segments.join("/")
            ))),
        }
    }

    fn create_offer(&mut self, resource: &Value, throughput: u32) {
        let id = format!("offer{}", self.next());
        self.offers.push(json!({
            "id": id,
            "_rid": id,
            "_self": format!("offers/{id}/"),
            "resource": self_link_of(resource),
            "offerResourceId": resource["_rid"],
            "offerType": "Invalid",
            "offerVersion": "V2",
            "content": { "offerThroughput": throughput }
        }));
    }

    fn remove_offers(&mut self, rids: &[Value]) {
        self.offers
            .retain(|offer| !rids.contains(&offer["offerResourceId"]));
    }

    fn create_database(&mut self, request: &Request) -> Handled {
        let mut body = json_body(request)?;
        let id = required_id(&body)?;
        let throughput = offer_throughput(request)?;
        if self.database(&id).is_ok() {
            return Err(conflict());
        }

        let version = self.next();
        stamp(&mut body, &format!("db{version}"), "dbs/", version);
        body.insert("_colls".into(), json!("colls/"));
        body.insert("_users".into(), json!("users/"));
        let body = Value::Object(body);

        if let Some(throughput) = throughput {
            self.create_offer(&body, throughput);
        }
        self.databases.push(StoredDatabase {
            body: body.clone(),
            collections: Vec::new(),
        });
        Ok(Reply::json(StatusCode::CREATED, body))
    }

    fn delete_database(&mut self, db: &str) -> Handled {
        let index = self
            .databases
            .iter()
            .position(|d| id_of(&d.body) == db)
            .ok_or_else(not_found)?;
        let removed = self.databases.remove(index);

        let mut rids = vec![removed.body["_rid"].clone()];
        rids.extend(removed.collections.iter().map(|c| c.body["_rid"].clone()));
        self.remove_offers(&rids);
        Ok(Reply::empty(StatusCode::NO_CONTENT))
    }

    fn create_collection(&mut self, request: &Request, db: &str) -> Handled {
        let mut body = json_body(request)?;
        let id = required_id(&body)?;
        let throughput = offer_throughput(request)?;
        let database = self.database(db)?;
        if database.collections.iter().any(|c| id_of(&c.body) == id) {
            return Err(conflict());
        }
        let prefix = format!("{}colls/", self_link_of(&database.body));

        let partition_key = body
            .get("partitionKey")
            .map(|pk| serde_json::from_value::<PartitionKeyDefinition>(pk.clone()))
            .transpose()
            .map_err(|e| bad_request(format!("Invalid partition key definition: {e}")))?;
        body.entry("indexingPolicy")
            .or_insert_with(default_indexing_policy);

        let version = self.next();
        stamp(&mut body, &format!("coll{version}"), &prefix, version);
        for (link, value) in [
            ("_docs", "docs/"),
            ("_sprocs", "sprocs/"),
            ("_triggers", "triggers/"),
            ("_udfs", "udfs/"),
            ("_conflicts", "conflicts/"),
        ] {
            body.insert(link.into(), json!(value));
        }
        let body = Value::Object(body);

        self.create_offer(&body, throughput.unwrap_or(DEFAULT_THROUGHPUT));
        self.lsn += 1;
        self.database_mut(db)?.collections.push(StoredCollection {
            body: body.clone(),
            partition_key,
            documents: Vec::new(),
        });
        Ok(Reply::json(StatusCode::CREATED, body))
    }

    fn replace_collection(&mut self, request: &Request, db: &str, coll: &str) -> Handled {
        let body = json_body(request)?;
        let policy = body
            .get("indexingPolicy")
            .cloned()
            .ok_or_else(|| bad_request("The indexing policy is required."))?;
        if body.get("id").and_then(Value::as_str) != Some(coll) {
            return Err(bad_request("The id in the body doesn't match the collection."));
        }
        let version = self.next();
        self.lsn += 1;

        let collection = self.collection_mut(db, coll)?;
        if body.get("partitionKey") != collection.body.get("partitionKey") {
            return Err(bad_request(
                "The partition key of a collection can't be changed.",
            ));
        }
        let stored = collection
            .body
            .as_object_mut()
            .ok_or_else(|| bad_request("corrupt collection"))?;
        stored.insert("indexingPolicy".into(), reorder_policy(policy));
        let rid = stored["_rid"].as_str().unwrap_or_default().to_string();
        let prefix = self_link_of(&collection.body).replace(&format!("{rid}/"), "");
        if let Some(stored) = collection.body.as_object_mut() {
            stamp(stored, &rid, &prefix, version);
        }
        Ok(Reply::json(StatusCode::OK, collection.body.clone()))
    }

    fn delete_collection(&mut self, db: &str, coll: &str) -> Handled {
        let database = self.database_mut(db)?;
        let index = database
            .collections
            .iter()
            .position(|c| id_of(&c.body) == coll)
            .ok_or_else(not_found)?;
        let removed = database.collections.remove(index);
        self.remove_offers(&[removed.body["_rid"].clone()]);
        self.lsn += 1;
        Ok(Reply::empty(StatusCode::NO_CONTENT))
    }

    fn create_document(&mut self, request: &Request, db: &str, coll: &str) -> Handled {
        let mut body = json_body(request)?;
        let id = required_id(&body)?;
        let upsert = header_is_true(request, constants::IS_UPSERT);

        let collection = self.collection(db, coll)?;
        let partition_key = validated_partition_key(
            request,
            collection.partition_key.as_ref(),
            &Value::Object(body.clone()),
        )?;
        let existing = collection
            .documents
            .iter()
            .position(|d| id_of(&d.body) == id && d.partition_key == partition_key);
        if existing.is_some() && !upsert {
            return Err(conflict());
        }
        let prefix = format!("{}docs/", self_link_of(&collection.body));
        let rid = match existing {
            Some(index) => collection.documents[index].body["_rid"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            None => format!("doc{}", self.counter + 1),
        };

        let version = self.next();
        stamp(&mut body, &rid, &prefix, version);
        body.insert("_attachments".into(), json!("attachments/"));
        let body = Value::Object(body);
        self.lsn += 1;

        let collection = self.collection_mut(db, coll)?;
        let stored = StoredDocument {
            body: body.clone(),
            partition_key,
        };
        match existing {
            Some(index) => {
                collection.documents[index] = stored;
                Ok(Reply::json(StatusCode::OK, body))
            }
            None => {
                collection.documents.push(stored);
                Ok(Reply::json(StatusCode::CREATED, body))
            }
        }
    }

    fn replace_document(&mut self, request: &Request, db: &str, coll: &str, doc: &str) -> Handled {
        let mut body = json_body(request)?;
        if required_id(&body)? != doc {
            return Err(bad_request("The id in the body doesn't match the document."));
        }
        let collection = self.collection(db, coll)?;
        let partition_key = validated_partition_key(
            request,
            collection.partition_key.as_ref(),
            &Value::Object(body.clone()),
        )?;
        let index = collection
            .documents
            .iter()
            .position(|d| id_of(&d.body) == doc && d.partition_key == partition_key)
            .ok_or_else(not_found)?;
        let current = &collection.documents[index].body;
        if let Some(expected) = request.headers().get_optional_str(constants::IF_MATCH) {
            if current.get("_etag").and_then(Value::as_str) != Some(expected) {
                return Err(Reply::error(
                    StatusCode::PRECONDITION_FAILED,
                    "PreconditionFailed",
                    "Operation cannot be performed because one of the specified precondition is not met.",
                ));
            }
        }
        let rid = current["_rid"].as_str().unwrap_or_default().to_string();
        let prefix = format!("{}docs/", self_link_of(&collection.body));

        let version = self.next();
        stamp(&mut body, &rid, &prefix, version);
        body.insert("_attachments".into(), json!("attachments/"));
        let body = Value::Object(body);
        self.lsn += 1;

        self.collection_mut(db, coll)?.documents[index] = StoredDocument {
            body: body.clone(),
            partition_key,
        };
        Ok(Reply::json(StatusCode::OK, body))
    }

    fn delete_document(&mut self, request: &Request, db: &str, coll: &str, doc: &str) -> Handled {
        let collection = self.collection_mut(db, coll)?;
        let partition_key = supplied_partition_key(request, collection.partition_key.as_ref())?;
        let index = collection
            .documents
            .iter()
            .position(|d| id_of(&d.body) == doc && d.partition_key == partition_key)
            .ok_or_else(not_found)?;
        collection.documents.remove(index);
        self.lsn += 1;
        Ok(Reply::empty(StatusCode::NO_CONTENT))
    }

    fn query_documents(&mut self, request: &Request, db: &str, coll: &str) -> Handled {
        let filter = Filter::parse(request)?;
        let collection = self.collection(db, coll)?;
        let partition_key = match request.headers().get_optional_str(constants::PARTITION_KEY) {
            Some(_) => Some(supplied_partition_key(request, None)?),
            None => None,
        };
        if partition_key.is_none()
            && collection.partition_key.is_some()
            && !header_is_true(request, constants::ENABLE_CROSS_PARTITION_QUERY)
        {
            return Err(bad_request(
                "Cross partition query is required but disabled. Please set x-ms-documentdb-query-enablecrosspartition to true, specify x-ms-documentdb-partitionkey, or revise your query to avoid this exception.",
            ));
        }

        let items = collection
            .documents
            .iter()
            .filter(|d| partition_key.as_ref().is_none_or(|pk| &d.partition_key == pk))
            .map(|d| &d.body)
            .filter(|body| filter.matches(body))
            .cloned()
            .collect();
        page(request, "Documents", items)
    }
}

impl MockCosmosService {
    /// Creates an empty account that accepts requests signed with `key` (base64).
    pub fn new(key: &str) -> Self {
        MockCosmosService {
            key: STANDARD.decode(key).unwrap(),
            state: Mutex::new(State::default()),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Request {
        self.state.lock().unwrap().requests.last().cloned().unwrap()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn offer_count(&self) -> usize {
        self.state.lock().unwrap().offers.len()
    }

    /// Checks the master-key signature over `verb`, resource type, resource link and date.
    fn authorize(&self, request: &Request, segments: &[&str]) -> Result<(), Reply> {
        let unauthorized = || {
            Reply::error(
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "The input authorization token can't serve the request.",
            )
        };
        let headers = request.headers();
        if !headers.contains(constants::VERSION) {
            return Err(bad_request("The x-ms-version header is required."));
        }
        let date = headers
            .get_optional_str(constants::DATE)
            .ok_or_else(unauthorized)?;
        let authorization = headers
            .get_optional_str(constants::AUTHORIZATION)
            .ok_or_else(unauthorized)?;

        let (resource_type, resource_link) = match segments.len() {
            0 => return Err(not_found()),
            n if n % 2 == 1 => (segments[n - 1], segments[..n - 1].join("/")),
            n => (segments[n - 2], segments.join("/")),
        };
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            request.method().as_str().to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key).unwrap();
        mac.update(payload.as_bytes());
        let expected = format!(
            "type=master&ver=1.0&sig={}",
            STANDARD.encode(mac.finalize().into_bytes())
        );

        if percent_decode_str(authorization).decode_utf8_lossy() == expected {
            Ok(())
        } else {
            Err(unauthorized())
        }
    }
}

#[async_trait]
impl HttpClient for MockCosmosService {
    async fn execute_request(&self, request: &Request) -> azure_data::Result<RawResponse> {
        let segments: Vec<String> = request
            .url()
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        let reply = match self.authorize(request, &segments) {
            Ok(()) => state.route(request, &segments).unwrap_or_else(|e| e),
            Err(reply) => reply,
        };

        let collection_scoped = matches!(segments.as_slice(), ["dbs", _, "colls", _, ..]);
        let session_token = collection_scoped.then(|| format!("0:1#{}", state.lsn));
        Ok(reply.into_raw(session_token))
    }
}

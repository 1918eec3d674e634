//! Endpoint behavior of table views


use assert_json_diff::assert_json_eq;
use fixtures::*;
use http::StatusCode;
use http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, EXPIRES};
use reinhardt_tables::{DatatableRequest, TableSchema};
use reinhardt_tables_views::{
	DEFAULT_ERROR_MESSAGE, DatatableView, NEVER_CACHE, TableRegistry, ViewSettings,
	datatable_config,
};
use rstest::*;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[rstest]
fn test_data_request_envelope(employee_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(employee_table);
	let request = DatatableRequest::get(
		"/employees/data/?draw=2&start=0&length=2&order[0][column]=1&order[0][dir]=asc",
	);

	// Act
	let response = view.as_json(&request);

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
	assert_eq!(response.headers()[CACHE_CONTROL], NEVER_CACHE);
	assert!(response.headers().contains_key(EXPIRES));
	assert_json_eq!(
		body_json(&response),
		json!({
			"draw": 2,
			"recordsTotal": 4,
			"recordsFiltered": 4,
			"data": [
				[r#"<a href="/employees/4/">Dave</a>"#, "Brown", "Support", "2020-01-20"],
				[r#"<a href="/employees/2/">Bob</a>"#, "Jones", "Support", "2019-07-15"]
			],
			"result": "ok"
		})
	);
}

#[rstest]
fn test_search_narrows_filtered_count(employee_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(employee_table);
	let request = DatatableRequest::post(
		"/employees/data/",
		"draw=5&start=0&length=10&search[value]=smith",
	);

	// Act
	let body = body_json(&view.as_json(&request));

	// Assert
	assert_eq!(body["draw"], json!(5));
	assert_eq!(body["recordsTotal"], json!(4));
	assert_eq!(body["recordsFiltered"], json!(2));
	assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[rstest]
fn test_failure_keeps_envelope_shape(unconfigured_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(unconfigured_table);
	let request = DatatableRequest::get("/employees/data/?draw=9");

	// Act
	let response = view.as_json(&request);

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	assert_json_eq!(
		body_json(&response),
		json!({
			"draw": 9,
			"recordsTotal": 0,
			"recordsFiltered": 0,
			"data": [],
			"result": "error",
			"error": DEFAULT_ERROR_MESSAGE
		})
	);
}

#[rstest]
fn test_debug_mode_exposes_error_detail(unconfigured_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(unconfigured_table).with_settings(ViewSettings::debug());
	let request = DatatableRequest::get("/employees/data/?draw=1");

	// Act
	let body = body_json(&view.as_json(&request));

	// Assert
	let error = body["error"].as_str().unwrap();
	assert!(error.contains("EmployeeTable needs a model or an initial_dataset override"));
	assert!(error.contains("ImproperlyConfigured"));
}

#[rstest]
fn test_invalid_parameter_still_echoes_draw(employee_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(employee_table).with_settings(ViewSettings::debug());
	let request = DatatableRequest::get("/employees/data/?draw=12&start=abc");

	// Act
	let body = body_json(&view.as_json(&request));

	// Assert
	assert_eq!(body["draw"], json!(12));
	assert_eq!(body["result"], json!("error"));
	assert!(body["error"].as_str().unwrap().contains("start"));
}

/// A tracing layer that captures each event as its level, message and fields
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		// Create a visitor to extract the message and the other fields
		struct FieldVisitor {
			message: String,
			fields: Vec<String>,
		}

		impl tracing::field::Visit for FieldVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				} else {
					self.fields.push(format!("{}={:?}", field.name(), value));
				}
			}
		}

		let mut visitor = FieldVisitor {
			message: String::new(),
			fields: Vec::new(),
		};
		event.record(&mut visitor);

		let mut logs = self.logs.lock().unwrap();
		logs.push(format!(
			"[{}] {} {}",
			event.metadata().level(),
			visitor.message,
			visitor.fields.join(" ")
		));
	}
}

fn capture_logs() -> (Arc<Mutex<Vec<String>>>, tracing::subscriber::DefaultGuard) {
	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };
	let guard = tracing_subscriber::registry().with(capture).set_default();
	(logs, guard)
}

#[rstest]
fn test_failure_is_logged(unconfigured_table: TableSchema) {
	// Arrange
	let (logs, _guard) = capture_logs();
	let view = DatatableView::new(unconfigured_table);

	// Act
	let _ = view.as_json(&DatatableRequest::get("/employees/data/?draw=1"));

	// Assert
	let captured = logs.lock().unwrap();
	let failure = captured
		.iter()
		.find(|log| log.contains("ERROR") && log.contains("Table request failed"));
	assert!(
		failure.is_some(),
		"Expected error log for failed request, but got: {:?}",
		*captured
	);
	let failure = failure.unwrap();
	assert!(failure.contains(r#"table="EmployeeTable""#));
	assert!(failure.contains("path=/employees/data/"));
	assert!(failure.contains("details=ImproperlyConfigured("));
}

#[rstest]
fn test_failure_log_carries_source_chain(broken_table: TableSchema) {
	// Arrange
	let (logs, _guard) = capture_logs();
	let view = DatatableView::new(broken_table);

	// Act
	let response = view.as_json(&DatatableRequest::get("/employees/data/?draw=3"));

	// Assert
	assert_eq!(body_json(&response)["error"], json!(DEFAULT_ERROR_MESSAGE));
	let captured = logs.lock().unwrap();
	let failure = captured
		.iter()
		.find(|log| log.contains("Table request failed"))
		.unwrap();
	assert!(
		failure.contains("Caused by: Data source error: connection reset"),
		"Expected the source chain in: {}",
		failure
	);
	assert!(failure.contains("details=Query(Backend("));
}

#[cfg(feature = "export")]
#[rstest]
fn test_csv_export_download(employee_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(employee_table);
	let request = DatatableRequest::get("/employees/data/?export=excel&search[value]=smith");

	// Act
	let response = view.as_json(&request);

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()[CONTENT_TYPE], "text/csv; charset=utf-8");
	let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap();
	assert!(disposition.starts_with("attachment; filename=\"Staff-"));
	assert!(disposition.ends_with(".csv\""));
	assert_eq!(
		std::str::from_utf8(response.body()).unwrap(),
		"First Name,Last Name,Department,Hired\n\
		 Alice,Smith,Sales,2021-03-01\n\
		 Carol,Smithers,Sales,2022-11-30\n"
	);
}

#[rstest]
fn test_export_ignores_paging(employee_table: TableSchema) {
	// Arrange
	let exporter = RecordingExporter::default();
	let recorded = exporter.recorded.clone();
	let view = DatatableView::new(employee_table)
		.with_exporter(move || Box::new(exporter.clone()));
	let request = DatatableRequest::get(
		"/employees/data/?export=excel&start=2&length=1&order[0][column]=3&order[0][dir]=desc",
	);

	// Act
	let response = view.as_json(&request);

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	let recorded = recorded.lock().unwrap();
	assert_eq!(recorded.sheet, "Staff");
	assert_eq!(
		recorded.headers,
		vec!["First Name", "Last Name", "Department", "Hired"]
	);
	assert_eq!(recorded.rows.len(), 4);
	assert_eq!(recorded.rows[0]["Last Name"], json!("Smithers"));
	assert_eq!(
		recorded.rows[0]["First Name"],
		json!(r#"<a href="/employees/3/">Carol</a>"#)
	);
}

#[rstest]
fn test_export_failure_becomes_error_envelope(employee_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(employee_table)
		.with_settings(ViewSettings::debug())
		.with_exporter(|| Box::new(FailingExporter));
	let request = DatatableRequest::get("/employees/data/?export=excel&draw=4");

	// Act
	let response = view.as_json(&request);

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(&response);
	assert_eq!(body["draw"], json!(4));
	assert_eq!(body["result"], json!("error"));
	assert!(body["error"].as_str().unwrap().contains("Export failed: disk full"));
}

#[rstest]
fn test_export_without_exporter(employee_table: TableSchema) {
	// Arrange
	let view = DatatableView::new(employee_table).without_exporter();

	// Act
	let body = body_json(&view.as_json(&DatatableRequest::get("/e/?export=excel")));

	// Assert
	assert_eq!(body["result"], json!("error"));
	assert_eq!(body["error"], json!(DEFAULT_ERROR_MESSAGE));
}

#[rstest]
fn test_other_export_values_get_json(employee_table: TableSchema) {
	let view = DatatableView::new(employee_table);

	let response = view.as_json(&DatatableRequest::get("/e/?export=pdf&draw=1"));

	assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
	assert_eq!(body_json(&response)["result"], json!("ok"));
}

#[rstest]
fn test_widget_config_from_table(employee_table: TableSchema) {
	// Act
	let config = datatable_config(&employee_table).unwrap();

	// Assert
	assert_json_eq!(
		serde_json::to_value(&config).unwrap(),
		json!({
			"columns": [
				{"orderable": false},
				{},
				{"orderable": false},
				{}
			],
			"order": [[3, "desc"]],
			"iDisplayLength": 10,
			"searching": true,
			"serverSide": true,
			"processing": true,
			"paging": true,
			"ordering": true
		})
	);
}

#[rstest]
fn test_registry_dispatches_by_name(employee_table: TableSchema) {
	// Arrange
	let registry = TableRegistry::new().register(DatatableView::new(employee_table));

	// Act
	let found = registry.dispatch(&DatatableRequest::get("/tables/?name=EmployeeTable&draw=3"));
	let missing = registry.dispatch(&DatatableRequest::get("/tables/?name=Payroll&draw=3"));

	// Assert
	assert_eq!(found.status(), StatusCode::OK);
	assert_eq!(body_json(&found)["recordsTotal"], json!(4));
	assert_eq!(missing.status(), StatusCode::NOT_FOUND);
	assert_json_eq!(
		body_json(&missing),
		json!({
			"draw": 3,
			"recordsTotal": 0,
			"recordsFiltered": 0,
			"data": [],
			"result": "error",
			"error": "Unknown table 'Payroll'"
		})
	);
	assert_eq!(registry.names().collect::<Vec<_>>(), vec!["EmployeeTable"]);
}

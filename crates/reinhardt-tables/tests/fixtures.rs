//! Common test fixtures for reinhardt-tables tests

#![allow(dead_code)]

use indexmap::IndexSet;
use reinhardt_columns::{ColumnExt, DateColumn, RouteTable, Row, TextColumn};
use reinhardt_tables::datasource::{
	DataSource, Dataset, MemoryDataSource, OrderSpec, Predicate, QueryResult,
};
use reinhardt_tables::{QueryError, TableMeta, TableSchema};
use rstest::*;
use serde_json::{Value, json};

/// Fixture providing sample employee rows
#[fixture]
pub fn employees() -> Vec<Value> {
	vec![
		json!({"id": 1, "first_name": "Alice", "last_name": "Smith", "department": "Sales", "start_date": "2021-03-01", "manager_id": null}),
		json!({"id": 2, "first_name": "Bob", "last_name": "Jones", "department": "Support", "start_date": "2019-07-15", "manager_id": 1}),
		json!({"id": 3, "first_name": "Carol", "last_name": "Smithers", "department": "Sales", "start_date": "2022-11-30", "manager_id": 1}),
		json!({"id": 4, "first_name": "Dave", "last_name": "Brown", "department": "Support", "start_date": "2020-01-20", "manager_id": 2}),
	]
}

/// Fixture providing an in-memory source over [`employees`]
#[fixture]
pub fn employee_source(employees: Vec<Value>) -> MemoryDataSource {
	MemoryDataSource::from_values(employees)
}

/// Fixture providing the routes linked columns reverse through
#[fixture]
pub fn routes() -> RouteTable {
	RouteTable::new()
		.route("employee_detail", "/employees/{id}/")
		.route("department", "/departments/{name}/")
}

/// Fixture providing an employee table with search and links configured
#[fixture]
pub fn employee_table(employee_source: MemoryDataSource, routes: RouteTable) -> TableSchema {
	TableSchema::builder("EmployeeTable")
		.column("first_name", TextColumn::new().link("employee_detail", ["id"]))
		.column("last_name", TextColumn::new())
		.column("department", TextColumn::new())
		.column("start_date", DateColumn::new().title("Hired"))
		.meta(
			TableMeta::new()
				.with_model(employee_source)
				.with_search_fields(["first_name", "last_name"])
				.with_order_columns(["last_name", "start_date"])
				.with_initial_order(["-start_date"])
				.with_url_resolver(routes),
		)
		.build()
}

/// Generates `count` rows `{id, name}`
pub fn numbered_rows(count: usize) -> Vec<Row> {
	(0..count)
		.map(|i| {
			let mut row = Row::new();
			row.insert("id".to_string(), json!(i));
			row.insert("name".to_string(), json!(format!("row-{:03}", i)));
			row
		})
		.collect()
}

/// A data source whose `count` always fails
#[derive(Debug, Clone, Default)]
pub struct FailingCountSource;

impl DataSource for FailingCountSource {
	fn all(&self) -> QueryResult<Box<dyn Dataset>> {
		Ok(Box::new(FailingCountDataset))
	}
}

/// Dataset returned by [`FailingCountSource`]
pub struct FailingCountDataset;

impl Dataset for FailingCountDataset {
	fn filter(self: Box<Self>, _predicate: &Predicate) -> QueryResult<Box<dyn Dataset>> {
		Ok(self)
	}

	fn order_by(self: Box<Self>, _specs: &[OrderSpec]) -> QueryResult<Box<dyn Dataset>> {
		Ok(self)
	}

	fn count(&self) -> QueryResult<usize> {
		Err(QueryError::Backend("connection reset".to_string()))
	}

	fn slice(self: Box<Self>, _start: usize, _stop: Option<usize>) -> QueryResult<Box<dyn Dataset>> {
		Ok(self)
	}

	fn values(&self, _fields: &IndexSet<String>) -> QueryResult<Vec<Row>> {
		Ok(Vec::new())
	}
}

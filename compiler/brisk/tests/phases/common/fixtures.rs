//! Host model objects.

use std::sync::Arc;

use brisk::{host_error, EvalError, HostObject, HostType, ParamType, Value};
use parking_lot::Mutex;

const NO_PARAMS: [ParamType; 0] = [];

fn str_arg<'a>(args: &'a [Value], member: &str) -> Result<&'a str, EvalError> {
    args.first()
        .and_then(Value::as_str)
        .ok_or_else(|| host_error(format!("`{member}` expects a string")))
}

fn float_arg(args: &[Value], member: &str) -> Result<f64, EvalError> {
    args.first()
        .and_then(Value::as_float)
        .ok_or_else(|| host_error(format!("`{member}` expects a number")))
}

/// A catalog entry that knows the prices and volumes of its catalog.
#[derive(Debug)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub volume: f64,
    catalog: Arc<Vec<(f64, f64)>>,
    output: Mutex<String>,
}

impl Product {
    fn in_top3(&self, key: impl Fn(&(f64, f64)) -> f64, own: f64) -> bool {
        let mut values: Vec<f64> = self.catalog.iter().map(key).collect();
        values.sort_by(|a, b| b.total_cmp(a));
        values.iter().take(3).any(|v| v.total_cmp(&own).is_eq())
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }
}

/// `Item1` to `Item10`, priced and stocked 1 to 10.
pub fn products() -> Vec<Arc<Product>> {
    let catalog: Arc<Vec<(f64, f64)>> =
        Arc::new((1..=10).map(|i| (f64::from(i), f64::from(i))).collect());
    (1..=10)
        .map(|i| {
            Arc::new(Product {
                name: format!("Item{i}"),
                price: f64::from(i),
                volume: f64::from(i),
                catalog: Arc::clone(&catalog),
                output: Mutex::new(String::new()),
            })
        })
        .collect()
}

pub fn product_type() -> Arc<HostType> {
    HostType::builder("Shop.Data.Product")
        .property_of("Name", |p: &Product| Ok(Value::string(p.name.as_str())))
        .property_of("Price", |p: &Product| Ok(Value::Float(p.price)))
        .property_of("Volume", |p: &Product| Ok(Value::Float(p.volume)))
        .method_of("LowerCaseName", NO_PARAMS, |p: &Product, _| {
            Ok(Value::string(p.name.to_lowercase()))
        })
        .method_of("Top3Price", NO_PARAMS, |p: &Product, _| {
            Ok(Value::Bool(p.in_top3(|entry| entry.0, p.price)))
        })
        .method_of(
            "Top3Volume",
            [ParamType::Float, ParamType::Str],
            |p: &Product, _| Ok(Value::Bool(p.in_top3(|entry| entry.1, p.volume))),
        )
        .method_of("AddOutput", [ParamType::Str], |p: &Product, args| {
            p.output.lock().push_str(str_arg(args, "AddOutput")?);
            Ok(Value::Null)
        })
        .method_of("GetOutput", NO_PARAMS, |p: &Product, _| {
            Ok(Value::string(p.output()))
        })
        .build()
}

pub fn product_object(product: &Arc<Product>) -> HostObject {
    HostObject::from_shared(product_type(), Arc::clone(product))
}

/// Sales figures for one product line.
#[derive(Debug, Default)]
pub struct MetricsModel {
    pub id: f64,
    pub name: String,
    pub sales: f64,
    pub volume: f64,
    pub margin: f64,
    pub profit: Mutex<f64>,
}

pub fn simple_metrics_model() -> MetricsModel {
    MetricsModel {
        id: 1.0,
        name: "Foo".to_string(),
        sales: 198.0,
        volume: 122.0,
        margin: 31.0,
        profit: Mutex::new(31.0),
    }
}

pub fn metrics_model_type() -> Arc<HostType> {
    HostType::builder("Shop.Data.MetricsModel")
        .property_of("Id", |m: &MetricsModel| Ok(Value::Float(m.id)))
        .property_of("Name", |m: &MetricsModel| Ok(Value::string(m.name.as_str())))
        .property_of("Sales", |m: &MetricsModel| Ok(Value::Float(m.sales)))
        .property_of("Volume", |m: &MetricsModel| Ok(Value::Float(m.volume)))
        .property_of("Margin", |m: &MetricsModel| Ok(Value::Float(m.margin)))
        .property_of_mut(
            "Profit",
            |m: &MetricsModel| Ok(Value::Float(*m.profit.lock())),
            |m: &MetricsModel, value| {
                *m.profit.lock() = value
                    .as_float()
                    .ok_or_else(|| host_error("Profit must be a number"))?;
                Ok(())
            },
        )
        .method_of("GetSalesVolume", NO_PARAMS, |m: &MetricsModel, _| {
            Ok(Value::Float(m.sales * m.volume))
        })
        .method_of("GetSales", NO_PARAMS, |m: &MetricsModel, _| {
            Ok(Value::Float(m.sales))
        })
        .method_of("GetVolume", NO_PARAMS, |m: &MetricsModel, _| {
            Ok(Value::Float(m.volume))
        })
        .method_of("GetProfit", NO_PARAMS, |m: &MetricsModel, _| {
            Ok(Value::Float(*m.profit.lock()))
        })
        .method_of("ProfitEq", [ParamType::Float], |m: &MetricsModel, args| {
            let num = float_arg(args, "ProfitEq")?;
            Ok(Value::Bool(m.profit.lock().total_cmp(&num).is_eq()))
        })
        .build()
}

pub fn metrics_object(model: MetricsModel) -> HostObject {
    HostObject::new(metrics_model_type(), model)
}

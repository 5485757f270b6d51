#[cfg(test)]
mod tests {
    use sqlh::{
        Composite, Entity, Join, JoinType, Selectable, SelectSpec, Value, build_count,
        build_select, resolve_fields, resolve_table_name,
    };

    #[derive(Entity, Default, Clone, Debug, PartialEq)]
    struct Customer {
        #[sqlh(key = "not null primary key autoincrement")]
        id: i64,
        name: String,
    }

    #[derive(Entity, Default, Clone, Debug, PartialEq)]
    #[sqlh(table = "orders")]
    struct Order {
        #[sqlh(name = "order_id", key = "not null primary key autoincrement")]
        id: i64,
        customer_id: i64,
        total: f64,
    }

    #[derive(Composite, Default, Debug, PartialEq)]
    struct CustomerOrder {
        customer: Customer,
        order: Order,
    }

    #[derive(Composite, Default, Debug, PartialEq)]
    struct OrderFirst {
        customer: Customer,
        #[sqlh(primary)]
        order: Order,
    }

    #[derive(Composite, Default, Debug, PartialEq)]
    struct Nested {
        inner: CustomerOrder,
        extra: Order,
    }

    #[test]
    fn table_identity_follows_the_primary() {
        assert_eq!(resolve_table_name::<CustomerOrder>(), "customer");
        assert_eq!(resolve_table_name::<OrderFirst>(), "orders");
        assert_eq!(resolve_table_name::<Nested>(), "customer");
        let names: Vec<_> = resolve_fields::<Nested>(true).iter().map(|c| c.name).collect();
        assert_eq!(names, ["id", "name"]);
    }

    #[test]
    fn table_override() {
        #[derive(Composite, Default)]
        #[sqlh(table = "customer_archive")]
        struct Archived {
            customer: Customer,
        }
        assert_eq!(Archived::table_name(), "customer_archive");
        assert_eq!(Archived::slot_count(), 2);
    }

    #[test]
    fn join_fields() {
        let join = Join::new::<Order>(JoinType::Left, "o", "c.id = o.customer_id");
        assert_eq!(join.fields, ["o.order_id", "o.customer_id", "o.total"]);
        let join = Join::new::<Order>(JoinType::Default, "", "customer.id = orders.customer_id");
        assert_eq!(join.fields, ["order_id", "customer_id", "total"]);
    }

    #[test]
    fn select_with_join() {
        let spec = SelectSpec::new()
            .alias("c")
            .join(Join::new::<Order>(JoinType::Left, "o", "c.id = o.customer_id"))
            .filter("o.total > ?")
            .order_by("c.id");
        assert_eq!(
            build_select::<CustomerOrder>(&spec).unwrap(),
            "SELECT c.id, c.name, o.order_id, o.customer_id, o.total FROM customer c LEFT JOIN orders o ON c.id = o.customer_id WHERE o.total > ? ORDER BY c.id;"
        );
        assert_eq!(
            build_count::<CustomerOrder>(&spec).unwrap(),
            "SELECT count(*) FROM customer c LEFT JOIN orders o ON c.id = o.customer_id WHERE o.total > ?;"
        );
    }

    #[test]
    fn select_with_sub_select() {
        let join = Join::sub_select::<Order>(
            JoinType::Inner,
            "SELECT * FROM orders WHERE total > 100;",
            "big",
            "c.id = big.customer_id",
        )
        .with_fields(["big.order_id", "big.customer_id", "big.total"]);
        let spec = SelectSpec::new().alias("c").join(join);
        assert_eq!(
            build_select::<CustomerOrder>(&spec).unwrap(),
            "SELECT c.id, c.name, big.order_id, big.customer_id, big.total FROM customer c INNER JOIN (SELECT * FROM orders WHERE total > 100) big ON c.id = big.customer_id;"
        );
    }

    #[test]
    fn slots_are_laid_out_primary_first() {
        let record = OrderFirst {
            customer: Customer {
                id: 1,
                name: "Ada".into(),
            },
            order: Order {
                id: 9,
                customer_id: 1,
                total: 12.5,
            },
        };
        assert_eq!(OrderFirst::slot_count(), 5);
        assert_eq!(
            record.slots(),
            vec![
                Value::Int64(Some(9)),
                Value::Int64(Some(1)),
                Value::Float64(Some(12.5)),
                Value::Int64(Some(1)),
                Value::Varchar(Some("Ada".into())),
            ]
        );
        let mut decoded = OrderFirst::default();
        decoded.apply_args(record.slots()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn nested_composite() {
        let record = Nested {
            inner: CustomerOrder {
                customer: Customer {
                    id: 3,
                    name: "Grace".into(),
                },
                order: Order {
                    id: 4,
                    customer_id: 3,
                    total: 1.0,
                },
            },
            extra: Order {
                id: 5,
                customer_id: 3,
                total: 2.0,
            },
        };
        assert_eq!(Nested::slot_count(), 8);
        let mut decoded = Nested::default();
        decoded.apply_args(record.slots()).unwrap();
        assert_eq!(decoded, record);
        assert!(decoded.apply_args(vec![Value::Null; 7]).is_err());
    }
}

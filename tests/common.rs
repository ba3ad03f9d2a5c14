//! Common test utilities for building graphs and fragment trees.
use kumitate::prelude::*;

#[allow(dead_code)]
pub fn param(name: &str, param_type: &str) -> Param {
    Param::new(name, param_type)
}

/// Creates a straight-line graph.
///
/// Logic: `request(url) -> fetch -> parse -> response(title)`
#[allow(dead_code)]
pub fn create_fetch_parse_graph() -> Graph {
    Graph::new(vec![
        Node::start("request", vec![param("url", "str")], "fetch"),
        Node::action(
            "fetch",
            vec![param("url", "str")],
            vec![param("page", "str")],
            "parse",
        ),
        Node::action(
            "parse",
            vec![param("page", "str")],
            vec![param("title", "str")],
            "response",
        ),
        Node::end("response", vec![param("title", "str")]),
    ])
}

/// Composite root with `fetch` and `parse` leaves. Both pin `requests`, with
/// different versions; `fetch` declares it first.
#[allow(dead_code)]
pub fn create_fetch_parse_fragment() -> FunctionFragment {
    let fetch = FunctionFragment::new("fetch")
        .with_import("import requests")
        .with_package(RequiredPackage::pinned("requests", "2.31.0"))
        .with_argument("url", TypeRef::primitive("str"))
        .with_return(TypeRef::primitive("str"))
        .with_body("def fetch(url: str) -> str:\n    return requests.get(url, timeout=10).text\n");
    let parse = FunctionFragment::new("parse")
        .with_import("import requests")
        .with_import("from bs4 import BeautifulSoup")
        .with_package(RequiredPackage::pinned("requests", "2.0.0"))
        .with_package(RequiredPackage::pinned("beautifulsoup4", "4.12").with_specifier(">="))
        .with_argument("page", TypeRef::primitive("str"))
        .with_return(TypeRef::primitive("str"))
        .with_body(
            "def parse(page: str) -> str:\n    return BeautifulSoup(page, \"html.parser\").title.string\n",
        );
    FunctionFragment::new("get_page").with_child(fetch).with_child(parse)
}

/// Creates a diamond: one branch whose arms rejoin at `join`.
#[allow(dead_code)]
pub fn create_diamond_graph() -> Graph {
    Graph::new(vec![
        Node::start("request", vec![param("x", "int")], "check"),
        Node::branch("check", "x > 0", "positive", "negative"),
        Node::action("positive", vec![param("x", "int")], vec![param("y", "int")], "join"),
        Node::action("negative", vec![param("x", "int")], vec![param("y", "int")], "join"),
        Node::action("join", vec![param("y", "int")], vec![param("z", "int")], "response"),
        Node::end("response", vec![param("z", "int")]),
    ])
}

/// Creates an outer branch whose true arm contains an inner diamond.
#[allow(dead_code)]
pub fn create_nested_graph() -> Graph {
    Graph::new(vec![
        Node::start("request", vec![param("a", "bool"), param("b", "bool")], "outer"),
        Node::branch("outer", "a", "inner", "other"),
        Node::branch("inner", "b", "left", "right"),
        Node::action("left", vec![], vec![], "inner_join"),
        Node::action("right", vec![], vec![], "inner_join"),
        Node::action("inner_join", vec![], vec![], "outer_join"),
        Node::action("other", vec![], vec![], "outer_join"),
        Node::action("outer_join", vec![], vec![param("result", "str")], "response"),
        Node::end("response", vec![param("result", "str")]),
    ])
}

/// Creates a branch whose arms end at separate end nodes and never rejoin.
#[allow(dead_code)]
pub fn create_split_ends_graph() -> Graph {
    Graph::new(vec![
        Node::start("request", vec![param("user_id", "str")], "exists"),
        Node::branch("exists", "user_id in cache", "cached", "load"),
        Node::end("cached", vec![param("user_id", "str")]),
        Node::action("load", vec![param("user_id", "str")], vec![param("user", "dict")], "loaded"),
        Node::end("loaded", vec![param("user", "dict")]),
    ])
}

/// Creates a branch with one else-if clause; all arms rejoin at `join`.
#[allow(dead_code)]
pub fn create_else_if_graph() -> Graph {
    Graph::new(vec![
        Node::start("request", vec![param("x", "int")], "classify"),
        Node::branch_else_if(
            "classify",
            "x > 10",
            "big",
            vec![ElseIf {
                condition: "x > 0".to_string(),
                true_next_node_name: "small".to_string(),
            }],
            "zero",
        ),
        Node::action("big", vec![], vec![], "join"),
        Node::action("small", vec![], vec![], "join"),
        Node::action("zero", vec![], vec![], "join"),
        Node::action("join", vec![], vec![], "response"),
        Node::end("response", vec![]),
    ])
}

/// Returns the graph with its node list reversed; control flow is unchanged.
#[allow(dead_code)]
pub fn reversed(mut graph: Graph) -> Graph {
    graph.nodes.reverse();
    graph
}

/// `Customer` references `Address`.
#[allow(dead_code)]
pub fn create_customer_type() -> TypeDefinition {
    let address = TypeDefinition::new(
        "Address",
        "A postal address.",
        vec![
            FieldDefinition::new("street", TypeRef::primitive("str"), "Street and number"),
            FieldDefinition::new("city", TypeRef::primitive("str"), ""),
        ],
    );
    TypeDefinition::new(
        "Customer",
        "A registered customer.",
        vec![
            FieldDefinition::new("name", TypeRef::primitive("str"), "Full name"),
            FieldDefinition::new("address", TypeRef::structured(address), "Billing address"),
        ],
    )
}

#[allow(dead_code)]
pub fn create_customer_graph() -> Graph {
    Graph::new(vec![
        Node::start("request", vec![param("customer_id", "str")], "load_customer"),
        Node::action(
            "load_customer",
            vec![param("customer_id", "str")],
            vec![param("customer", "Customer")],
            "describe",
        ),
        Node::action(
            "describe",
            vec![param("customer", "Customer")],
            vec![param("summary", "str")],
            "response",
        ),
        Node::end("response", vec![param("summary", "str")]),
    ])
}

/// Two leaves that both use `Customer`, one as return type and one as argument.
#[allow(dead_code)]
pub fn create_customer_fragment() -> FunctionFragment {
    let load = FunctionFragment::new("load_customer")
        .with_argument("customer_id", TypeRef::primitive("str"))
        .with_return(TypeRef::structured(create_customer_type()))
        .with_body(
            "def load_customer(customer_id: str) -> Customer:\n    return Customer(name=customer_id, address=Address(street=\"\", city=\"\"))\n",
        );
    let describe = FunctionFragment::new("describe")
        .with_argument("customer", TypeRef::structured(create_customer_type()))
        .with_return(TypeRef::primitive("str"))
        .with_body(
            "def describe(customer: Customer) -> str:\n    return f\"{customer.name}, {customer.address.city}\"\n",
        );
    FunctionFragment::new("customer_summary")
        .with_child(load)
        .with_child(describe)
}

/// A body tree-sitter cannot parse.
#[allow(dead_code)]
pub const BROKEN_BODY: &str = "def broken(:\n    return )\n";

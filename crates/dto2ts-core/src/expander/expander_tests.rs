#![allow(non_snake_case)]

use super::*;
use crate::model::{Annotation, JSON_PROPERTY_ANNOTATION, MethodDecl, TypeRef};
use crate::resolver::ClassGraph;
use crate::transaction::{Role, TransactionNaming};

struct Harness {
    graph: ClassGraph,
    config: GeneratorConfig,
    library: LibraryTypes,
    state: TraversalState,
}

impl Harness {
    fn new(graph: ClassGraph) -> Self {
        Self::with_config(graph, GeneratorConfig::default())
    }

    fn with_config(graph: ClassGraph, config: GeneratorConfig) -> Self {
        Self {
            graph,
            config,
            library: LibraryTypes::with_builtins(),
            state: TraversalState::new(),
        }
    }

    fn expand(&mut self, class: &ClassDecl) -> String {
        Traversal::new(&self.graph, &self.config, &self.library, &mut self.state).expand(class)
    }

    fn expand_with(&mut self, class: &ClassDecl, naming: &TransactionNaming) -> String {
        Traversal::new(&self.graph, &self.config, &self.library, &mut self.state)
            .with_naming(Some(naming))
            .expand(class)
    }

    fn text(&self, qualified_name: &str) -> &str {
        &self.state.get(qualified_name).unwrap().text
    }
}

fn string() -> TypeRef {
    TypeRef::class("java.lang.String")
}

fn item() -> ClassDecl {
    ClassDecl::class("com.acme.Item")
        .with_field(FieldDecl::new("sku", string()))
        .with_field(FieldDecl::new("qty", TypeRef::primitive("int")))
}

// ============================================================================
// Interface rendering
// ============================================================================

#[test]
fn Traversal___expand_class___renders_interface() {
    let mut h = Harness::new(ClassGraph::new());

    let name = h.expand(&item());

    assert_eq!(name, "Item");
    assert_eq!(
        h.text("com.acme.Item"),
        "interface Item {\n  sku: string;\n\n  qty: number;\n}\n"
    );
}

#[test]
fn Traversal___expand_class_without_fields___renders_empty_body() {
    let mut h = Harness::new(ClassGraph::new());

    h.expand(&ClassDecl::class("com.acme.Marker"));

    assert_eq!(h.text("com.acme.Marker"), "interface Marker {\n}\n");
}

#[test]
fn Traversal___expand_generic_class___uses_declared_parameters_in_header() {
    let mut h = Harness::new(ClassGraph::new());
    let pair = ClassDecl::class("com.acme.Pair").with_type_parameters(["K", "V"]);

    let name = h.expand(&pair);

    assert_eq!(name, "Pair<K, V>");
    assert!(h.text("com.acme.Pair").starts_with("interface Pair<K, V> {\n"));
}

#[test]
fn Traversal___field_doc___renders_comment_block() {
    let mut h = Harness::new(ClassGraph::new());
    let class = ClassDecl::class("com.acme.Item")
        .with_field(FieldDecl::new("sku", string()).with_doc("/**\n * Stock keeping unit\n * @see Catalog\n */"));

    h.expand(&class);

    assert_eq!(
        h.text("com.acme.Item"),
        "interface Item {\n  /**\n   * Stock keeping unit\n   */\n  sku: string;\n}\n"
    );
}

#[test]
fn Traversal___class_doc___is_stored_as_comment() {
    let mut h = Harness::new(ClassGraph::new());
    let class = item().with_doc("/** A line item. */");

    h.expand(&class);

    let decl = h.state.get("com.acme.Item").unwrap();
    assert_eq!(decl.comment.as_deref(), Some("/**\n * A line item.\n */\n"));
}

// ============================================================================
// Field policies
// ============================================================================

#[test]
fn Traversal___optional_mark___applies_to_unmarked_fields() {
    let config = GeneratorConfig::new().with_add_optional_mark_to_all_fields(true);
    let mut h = Harness::with_config(ClassGraph::new(), config);
    let class = ClassDecl::class("com.acme.User")
        .with_field(FieldDecl::new("nickname", string()))
        .with_field(
            FieldDecl::new("id", TypeRef::primitive("long"))
                .with_annotation(Annotation::new("jakarta.validation.constraints.NotNull")),
        );

    h.expand(&class);

    assert_eq!(
        h.text("com.acme.User"),
        "interface User {\n  nickname?: string;\n\n  id: number;\n}\n"
    );
}

#[test]
fn Traversal___serial_version_uid___is_skipped_by_default() {
    let mut h = Harness::new(ClassGraph::new());
    let class = ClassDecl::class("com.acme.Item")
        .with_field(FieldDecl::new("serialVersionUID", TypeRef::primitive("long")))
        .with_field(FieldDecl::new("sku", string()));

    h.expand(&class);

    assert_eq!(h.text("com.acme.Item"), "interface Item {\n  sku: string;\n}\n");
}

#[test]
fn Traversal___serial_version_uid___is_kept_when_disabled() {
    let config = GeneratorConfig::new().with_ignore_serial_version_uid_field(false);
    let mut h = Harness::with_config(ClassGraph::new(), config);
    let class = ClassDecl::class("com.acme.Item")
        .with_field(FieldDecl::new("serialVersionUID", TypeRef::primitive("long")));

    h.expand(&class);

    assert!(h.text("com.acme.Item").contains("serialVersionUID: number;"));
}

#[test]
fn Traversal___json_property_on_field___renames_field() {
    let mut h = Harness::new(ClassGraph::new());
    let class = ClassDecl::class("com.acme.Order").with_field(
        FieldDecl::new("orderId", TypeRef::primitive("long"))
            .with_annotation(Annotation::new(JSON_PROPERTY_ANNOTATION).with_value("order_id")),
    );

    h.expand(&class);

    assert!(h.text("com.acme.Order").contains("  order_id: number;\n"));
}

#[test]
fn Traversal___json_property_on_getter___renames_field() {
    let mut h = Harness::new(ClassGraph::new());
    let class = ClassDecl::class("com.acme.Order")
        .with_field(FieldDecl::new("orderId", TypeRef::primitive("long")))
        .with_method(
            MethodDecl::new("getOrderId")
                .with_annotation(Annotation::new("JsonProperty").with_value("ORDER_ID")),
        );

    h.expand(&class);

    assert!(h.text("com.acme.Order").contains("  ORDER_ID: number;\n"));
}

#[test]
fn Traversal___json_property_on_boolean_is_getter___renames_field() {
    let mut h = Harness::new(ClassGraph::new());
    let class = ClassDecl::class("com.acme.Order")
        .with_field(FieldDecl::new("paid", TypeRef::primitive("boolean")))
        .with_method(
            MethodDecl::new("isPaid")
                .with_annotation(Annotation::new(JSON_PROPERTY_ANNOTATION).with_value("is_paid")),
        );

    h.expand(&class);

    assert!(h.text("com.acme.Order").contains("  is_paid: boolean;\n"));
}

#[test]
fn Traversal___json_property_on_setter___renames_field() {
    let mut h = Harness::new(ClassGraph::new());
    let class = ClassDecl::class("com.acme.Order")
        .with_field(FieldDecl::new("note", string()))
        .with_method(
            MethodDecl::new("setNote")
                .with_annotation(Annotation::new(JSON_PROPERTY_ANNOTATION).with_value("remark")),
        );

    h.expand(&class);

    assert!(h.text("com.acme.Order").contains("  remark: string;\n"));
}

#[test]
fn Traversal___json_property_disabled___keeps_raw_name() {
    let config = GeneratorConfig::new().with_prefer_json_property_annotation_name(false);
    let mut h = Harness::with_config(ClassGraph::new(), config);
    let class = ClassDecl::class("com.acme.Order").with_field(
        FieldDecl::new("orderId", TypeRef::primitive("long"))
            .with_annotation(Annotation::new(JSON_PROPERTY_ANNOTATION).with_value("order_id")),
    );

    h.expand(&class);

    assert!(h.text("com.acme.Order").contains("  orderId: number;\n"));
}

// ============================================================================
// Inheritance
// ============================================================================

fn inheritance_graph() -> ClassGraph {
    ClassGraph::new()
        .with_project(
            ClassDecl::class("com.acme.Base")
                .with_super_class("com.acme.Root")
                .with_field(FieldDecl::new("createdBy", string()))
                .with_field(FieldDecl::new("id", TypeRef::primitive("long"))),
        )
        .with_project(
            ClassDecl::class("com.acme.Root")
                .with_super_class("java.lang.Object")
                .with_field(FieldDecl::new("version", TypeRef::primitive("int"))),
        )
}

fn child() -> ClassDecl {
    ClassDecl::class("com.acme.Child")
        .with_super_class("com.acme.Base")
        .with_field(FieldDecl::new("id", string()))
}

#[test]
fn Traversal___inherited_fields___follow_own_fields() {
    let mut h = Harness::new(inheritance_graph());

    h.expand(&child());

    assert_eq!(
        h.text("com.acme.Child"),
        "interface Child {\n  id: string;\n\n  createdBy: string;\n\n  version: number;\n}\n"
    );
}

#[test]
fn Traversal___ignore_parent_fields___emits_own_fields_only() {
    let config = GeneratorConfig::new().with_ignore_parent_fields(true);
    let mut h = Harness::with_config(inheritance_graph(), config);

    h.expand(&child());

    assert_eq!(h.text("com.acme.Child"), "interface Child {\n  id: string;\n}\n");
}

#[test]
fn Traversal___cyclic_superclass_chain___terminates() {
    let graph = ClassGraph::new()
        .with_project(ClassDecl::class("com.acme.A").with_super_class("com.acme.B"))
        .with_project(
            ClassDecl::class("com.acme.B")
                .with_super_class("com.acme.A")
                .with_field(FieldDecl::new("b", string())),
        );
    let mut h = Harness::new(graph);
    let a = ClassDecl::class("com.acme.A").with_super_class("com.acme.B");

    h.expand(&a);

    assert_eq!(h.text("com.acme.A"), "interface A {\n  b: string;\n}\n");
}

// ============================================================================
// Enums and unsupported kinds
// ============================================================================

#[test]
fn Traversal___expand_enum___renders_union() {
    let mut h = Harness::new(ClassGraph::new());

    let name = h.expand(&ClassDecl::enumeration("com.acme.Status", ["A", "B"]));

    assert_eq!(name, "Status");
    assert_eq!(h.text("com.acme.Status"), "type Status = 'A' | 'B';\n");
}

#[test]
fn Traversal___expand_enum_without_constants___renders_empty_union() {
    let mut h = Harness::new(ClassGraph::new());

    h.expand(&ClassDecl::enumeration("com.acme.Empty", Vec::<String>::new()));

    assert_eq!(h.text("com.acme.Empty"), "type Empty = ;\n");
}

#[test]
fn Traversal___expand_enum___ignores_non_constant_fields() {
    let mut h = Harness::new(ClassGraph::new());
    let status = ClassDecl::enumeration("com.acme.Status", ["ON"])
        .with_field(FieldDecl::new("label", string()));

    h.expand(&status);

    assert_eq!(h.text("com.acme.Status"), "type Status = 'ON';\n");
}

#[test]
fn Traversal___expand_interface___returns_unknown_without_declaration() {
    let mut h = Harness::new(ClassGraph::new());

    let name = h.expand(&ClassDecl::new("com.acme.Api", DeclarationKind::Interface));

    assert_eq!(name, UNKNOWN);
    assert!(h.state.is_empty());
}

#[test]
fn Traversal___expand_annotation___returns_unknown() {
    let mut h = Harness::new(ClassGraph::new());

    let name = h.expand(&ClassDecl::new("com.acme.Marker", DeclarationKind::Annotation));

    assert_eq!(name, UNKNOWN);
}

// ============================================================================
// Memoization and cycles
// ============================================================================

#[test]
fn Traversal___expand_twice___emits_once() {
    let mut h = Harness::new(ClassGraph::new());

    h.expand(&item());
    let again = h.expand(&item());

    assert_eq!(again, "Item");
    assert_eq!(h.state.completed_len(), 1);
}

#[test]
fn Traversal___mutual_references___terminate_with_two_declarations() {
    let a = ClassDecl::class("com.acme.A").with_field(FieldDecl::new("b", TypeRef::class("com.acme.B")));
    let b = ClassDecl::class("com.acme.B").with_field(FieldDecl::new("a", TypeRef::class("com.acme.A")));
    let graph = ClassGraph::new().with_project(a.clone()).with_project(b);
    let mut h = Harness::new(graph);

    h.expand(&a);

    assert_eq!(h.state.completed_len(), 2);
    assert_eq!(h.text("com.acme.A"), "interface A {\n  b: B;\n}\n");
    assert_eq!(h.text("com.acme.B"), "interface B {\n  a: A;\n}\n");
}

#[test]
fn Traversal___self_reference___references_itself_by_name() {
    let node = ClassDecl::class("com.acme.Node")
        .with_field(FieldDecl::new("next", TypeRef::class("com.acme.Node")))
        .with_field(FieldDecl::new(
            "children",
            TypeRef::class("java.util.List").with_args(vec![TypeRef::class("com.acme.Node")]),
        ));
    let mut h = Harness::new(ClassGraph::new().with_project(node.clone()));

    h.expand(&node);

    assert_eq!(
        h.text("com.acme.Node"),
        "interface Node {\n  next: Node;\n\n  children: Node[];\n}\n"
    );
}

#[test]
fn Traversal___diamond_references___expand_shared_class_once() {
    let shared = ClassDecl::class("com.acme.Shared").with_field(FieldDecl::new("v", string()));
    let left = ClassDecl::class("com.acme.Left").with_field(FieldDecl::new("s", TypeRef::class("com.acme.Shared")));
    let right = ClassDecl::class("com.acme.Right").with_field(FieldDecl::new("s", TypeRef::class("com.acme.Shared")));
    let root = ClassDecl::class("com.acme.Root")
        .with_field(FieldDecl::new("l", TypeRef::class("com.acme.Left")))
        .with_field(FieldDecl::new("r", TypeRef::class("com.acme.Right")));
    let graph = ClassGraph::new()
        .with_project(shared)
        .with_project(left)
        .with_project(right)
        .with_project(root.clone());
    let mut h = Harness::new(graph);

    h.expand(&root);

    let names: Vec<&str> = h.state.declarations().map(|d| d.simple_name.as_str()).collect();
    assert_eq!(names, vec!["Root", "Left", "Shared", "Right"]);
}

// ============================================================================
// Transaction-code naming
// ============================================================================

fn coded_config() -> GeneratorConfig {
    GeneratorConfig::default().with_use_transaction_code_prefix(true)
}

fn statements_request() -> ClassDecl {
    ClassDecl::class("com.acme.QryStatementsTranrq")
        .with_field(FieldDecl::new("accountNo", string()))
        .with_field(FieldDecl::new("range", TypeRef::class("com.acme.DateRange")))
}

fn statements_response() -> ClassDecl {
    ClassDecl::class("com.acme.QryStatementsTranrs")
        .with_field(FieldDecl::new(
            "statements",
            TypeRef::class("java.util.List")
                .with_args(vec![TypeRef::class("com.acme.StatementDetail")]),
        ))
        .with_field(FieldDecl::new(
            "line",
            TypeRef::class("com.acme.QryStatementsTranrs$Line"),
        ))
}

fn statements_graph() -> ClassGraph {
    ClassGraph::new()
        .with_project(statements_request())
        .with_project(statements_response())
        .with_project(
            ClassDecl::class("com.acme.DateRange").with_field(FieldDecl::new("from", string())),
        )
        .with_project(
            ClassDecl::class("com.acme.StatementDetail")
                .with_field(FieldDecl::new("amount", TypeRef::primitive("int"))),
        )
        .with_project(
            ClassDecl::class("com.acme.QryStatementsTranrs$Line")
                .with_field(FieldDecl::new("no", TypeRef::primitive("int"))),
        )
}

fn statements_naming() -> TransactionNaming {
    TransactionNaming::new("QRYSTATEMENTS")
        .with_role("com.acme.QryStatementsTranrq", Role::Request)
        .with_role("com.acme.QryStatementsTranrs", Role::Response)
        .with_role("com.acme.StatementDetail", Role::Response)
}

#[test]
fn Traversal___transaction_naming___renames_signature_classes_only() {
    let mut h = Harness::with_config(statements_graph(), coded_config());

    let name = h.expand_with(&statements_request(), &statements_naming());

    assert_eq!(name, "QRYSTATEMENTSReq");
    assert_eq!(
        h.text("com.acme.QryStatementsTranrq"),
        "interface QRYSTATEMENTSReq {\n  accountNo: string;\n\n  range: DateRange;\n}\n"
    );
    assert_eq!(
        h.state.get("com.acme.QryStatementsTranrq").unwrap().simple_name,
        "QRYSTATEMENTSReq"
    );
    assert!(h.text("com.acme.DateRange").starts_with("interface DateRange {"));
}

#[test]
fn Traversal___transaction_naming___references_use_renamed_names() {
    let mut h = Harness::with_config(statements_graph(), coded_config());

    h.expand_with(&statements_response(), &statements_naming());

    assert_eq!(
        h.text("com.acme.QryStatementsTranrs"),
        "interface QRYSTATEMENTSResp {\n  statements: QRYSTATEMENTSRespDetail[];\n\n  line: QRYSTATEMENTSRespLine;\n}\n"
    );
    assert_eq!(
        h.text("com.acme.StatementDetail"),
        "interface QRYSTATEMENTSRespDetail {\n  amount: number;\n}\n"
    );
    assert_eq!(
        h.text("com.acme.QryStatementsTranrs$Line"),
        "interface QRYSTATEMENTSRespLine {\n  no: number;\n}\n"
    );
}

#[test]
fn Traversal___transaction_naming_disabled___keeps_java_names() {
    let mut h = Harness::new(statements_graph());

    let name = h.expand_with(&statements_request(), &statements_naming());

    assert_eq!(name, "QryStatementsTranrq");
    assert!(
        h.text("com.acme.QryStatementsTranrq")
            .starts_with("interface QryStatementsTranrq {")
    );
}

#[test]
fn Traversal___transaction_name_taken___second_class_keeps_java_name() {
    let first = ClassDecl::class("com.acme.FooTranrq")
        .with_field(FieldDecl::new("bar", TypeRef::class("com.acme.BarTranrq")));
    let second =
        ClassDecl::class("com.acme.BarTranrq").with_field(FieldDecl::new("id", string()));
    let graph = ClassGraph::new()
        .with_project(first.clone())
        .with_project(second);
    let naming = TransactionNaming::new("CODE")
        .with_role("com.acme.FooTranrq", Role::Request)
        .with_role("com.acme.BarTranrq", Role::Request);
    let mut h = Harness::with_config(graph, coded_config());

    h.expand_with(&first, &naming);

    assert_eq!(
        h.text("com.acme.FooTranrq"),
        "interface CODEReq {\n  bar: BarTranrq;\n}\n"
    );
    assert!(h.text("com.acme.BarTranrq").starts_with("interface BarTranrq {"));
}

#[test]
fn Traversal___generic_container___renamed_unless_only_generic_dto() {
    let wrapper = ClassDecl::class("com.acme.ApiResponse")
        .with_type_parameters(["T"])
        .with_field(FieldDecl::new("data", TypeRef::type_parameter("T")));
    let naming =
        TransactionNaming::new("QRYSTATEMENTS").with_role("com.acme.ApiResponse", Role::Response);

    let mut renamed = Harness::with_config(ClassGraph::new(), coded_config());
    let mut kept = Harness::with_config(
        ClassGraph::new(),
        coded_config().with_only_process_generic_dto(true),
    );

    assert_eq!(renamed.expand_with(&wrapper, &naming), "QRYSTATEMENTSResp<T>");
    assert_eq!(kept.expand_with(&wrapper, &naming), "ApiResponse<T>");
}

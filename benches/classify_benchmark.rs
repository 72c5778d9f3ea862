/// Benchmarks for definition classification and smart jump dispatch
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use smart_jump::classifier::Classifier;
use smart_jump::dispatch::{CommandRegistry, SmartJump};
use smart_jump::document::{Buffer, CursorPosition, DocumentView};
use smart_jump::language::Language;

/// One definition line and one usage line per language
fn sample_buffers() -> Vec<(Language, Buffer)> {
    let samples = [
        (
            Language::Go,
            "func (s *Server) ProcessRequest(req *Request) error {\n\treturn req.Validate()\n}",
        ),
        (
            Language::Python,
            "async def handle(self, request):\n    return await self.reply(request)",
        ),
        (
            Language::JavaScript,
            "export const fetchUser = async (id: string): Promise<User> => {\n  return api.get(id);\n};",
        ),
        (
            Language::C,
            "static int parse_header(struct buf *b, size_t len)\n{\n  return parse_body(b, len);\n}",
        ),
        (
            Language::Rust,
            "pub(crate) async fn serve(&self) -> Result<()> {\n    self.listen().await\n}",
        ),
        (
            Language::Lisp,
            "(defun my-jump (arg)\n  (my-other-jump arg))",
        ),
        (Language::Other, "some plain text\nmore text"),
    ];

    samples
        .into_iter()
        .map(|(language, text)| (language, Buffer::new(language, text)))
        .collect()
}

fn benchmark_classify(c: &mut Criterion) {
    let classifier = Classifier::default();
    let mut group = c.benchmark_group("classify");

    for (language, buffer) in sample_buffers() {
        let usage = buffer.clone().with_cursor(CursorPosition::new(1, 4));
        group.bench_with_input(
            BenchmarkId::from_parameter(language.display_name()),
            &(buffer, usage),
            |b, (definition, usage)| {
                b.iter(|| {
                    black_box(classifier.is_at_definition(black_box(definition)));
                    black_box(classifier.is_at_definition(black_box(usage)));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_dispatch(c: &mut Criterion) {
    let mut registry = CommandRegistry::new();
    registry.register("goto-definition", |_doc: &dyn DocumentView| Ok(()));
    registry.register("find-references", |_doc: &dyn DocumentView| Ok(()));

    let mut smart_jump = SmartJump::default();
    smart_jump.enable(&mut registry).unwrap();

    let buffer = Buffer::new(
        Language::Go,
        "func ProcessRequest(req *Request) error {\n\treturn req.Validate()\n}",
    );

    c.bench_function("wrapped_goto_definition", |b| {
        b.iter(|| {
            registry
                .invoke("goto-definition", black_box(&buffer))
                .unwrap();
        });
    });
}

criterion_group!(benches, benchmark_classify, benchmark_dispatch);
criterion_main!(benches);

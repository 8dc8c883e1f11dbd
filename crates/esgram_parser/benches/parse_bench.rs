use criterion::{black_box, criterion_group, criterion_main, Criterion};
use esgram_core::arena::AstArena;
use esgram_core::intern::Interner;
use esgram_parser::{Parser, ParserOptions};
use esgram_scanner::tokenize;

// A medium-size module exercising most statement and expression forms.
const MODULE_SOURCE: &str = r#"
import { EventEmitter } from "events";
import * as util from "util";

const DEFAULTS = { concurrency: 4, retries: 3, timeout: 1000 };

export class Queue extends EventEmitter {
    #pending = [];
    #running = 0;
    static instances = 0;

    constructor(options = {}) {
        super();
        this.options = { ...DEFAULTS, ...options };
        Queue.instances++;
    }

    get size() { return this.#pending.length; }
    get running() { return this.#running; }

    push(task, { priority = 0, label } = {}) {
        const entry = { task, priority, label: label ?? `task-${this.size}` };
        let i = this.#pending.length;
        while (i > 0 && this.#pending[i - 1].priority < priority) {
            i--;
        }
        this.#pending.splice(i, 0, entry);
        this.#drain();
        return this;
    }

    async #run({ task, label }) {
        for (let attempt = 1; attempt <= this.options.retries; attempt++) {
            try {
                const result = await Promise.race([task(), this.#timeout(label)]);
                this.emit("done", label, result);
                return result;
            } catch (err) {
                if (attempt === this.options.retries) {
                    this.emit("error", err);
                    throw err;
                }
            } finally {
                this.#running -= 1;
            }
        }
    }

    #timeout(label) {
        return new Promise((_, reject) =>
            setTimeout(() => reject(new Error(`${label} timed out`)), this.options.timeout));
    }

    #drain() {
        while (this.#running < this.options.concurrency && this.size > 0) {
            this.#running += 1;
            this.#run(this.#pending.shift()).catch(() => {});
        }
    }

    *[Symbol.iterator]() {
        for (const { label } of this.#pending) yield label;
    }
}

export function summarize(results) {
    const counts = {};
    for (const key in results) {
        switch (typeof results[key]) {
            case "number": counts.numbers = (counts.numbers || 0) + 1; break;
            case "string": counts.strings = (counts.strings || 0) + 1; break;
            default: counts.other = (counts.other || 0) + 1;
        }
    }
    return Object.entries(counts)
        .filter(([, n]) => n > 0)
        .map(([k, n]) => k + "=" + n)
        .join(", ");
}

export default async function main(argv) {
    const [, , ...files] = argv;
    const queue = new Queue({ concurrency: files.length > 8 ? 8 : files.length });
    for await (const line of util.lines(files)) {
        queue.push(async () => line.trim().split(/\s+/).length);
    }
    return queue;
}
"#;

// Ambiguity-heavy input: every statement starts with a parenthesized or
// bracketed form that could be an arrow head or a destructuring target.
const COVER_SOURCE: &str = r#"
(a, b) => a + b;
(a, b);
[x, y] = [y, x];
[x, y].forEach(f);
({ a, b } = obj);
({ a, b }).toString();
async (a) => await a;
async (a);
(({ p = 1, q: [r, ...s] }) => p + r)(o);
((a)) + ((b)) * ((c));
"#;

fn parse_once(source: &str, options: ParserOptions) {
    let arena = AstArena::new();
    let interner = Interner::new();
    let stream = tokenize(source);
    let module = Parser::new(&arena, &interner, &stream)
        .with_options(options)
        .parse_module();
    black_box(module.is_ok());
}

fn bench_parse_module(c: &mut Criterion) {
    c.bench_function("parse_module_medium", |b| {
        b.iter(|| parse_once(black_box(MODULE_SOURCE), ParserOptions::default()));
    });
    c.bench_function("parse_module_strict", |b| {
        b.iter(|| parse_once(black_box(MODULE_SOURCE), ParserOptions::strict()));
    });
}

fn bench_parse_cover_grammars(c: &mut Criterion) {
    let source = COVER_SOURCE.repeat(20);
    c.bench_function("parse_cover_grammars", |b| {
        b.iter(|| parse_once(black_box(&source), ParserOptions::default()));
    });
}

criterion_group!(benches, bench_parse_module, bench_parse_cover_grammars);
criterion_main!(benches);

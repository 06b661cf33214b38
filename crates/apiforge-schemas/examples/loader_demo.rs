//! Schema Loader Demonstration
//!
//! This example shows how the SchemaLoader resolves a small document
//! graph: local files referencing each other, reference namespacing,
//! in-memory roots, and error handling.
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use apiforge_schemas::{LoaderResult, SchemaLoader};

#[tokio::main]
async fn main() -> LoaderResult<()> {
    println!("🚀 Schema Loader Demonstration");
    println!("================================\n");

    // Create a temporary directory for our example documents
    let temp_dir = TempDir::new().unwrap();
    let base_path = temp_dir.path();

    create_example_files(base_path);

    demo_graph_loading(base_path).await?;
    demo_in_memory_loading().await?;
    demo_error_handling(base_path).await;

    println!("\n✅ All demonstrations completed successfully!");

    Ok(())
}

fn create_example_files(base_path: &Path) {
    println!("📁 Creating example schema files...\n");

    // A root OpenAPI-style document in YAML, referencing a sibling
    let root = r##"# Example API description
openapi: "3.1.0"
info:
  title: "Petstore"
paths:
  /pets:
    get:
      responses:
        "200":
          schema:
            $ref: "./models.json#/definitions/Pet"
components:
  schemas:
    Error:
      type: object
    ErrorList:
      items:
        $ref: "#/components/schemas/Error"
"##;
    fs::write(base_path.join("openapi.yaml"), root).unwrap();

    // Referenced definitions in JSON, with an internal reference of
    // their own
    let models = json!({
        "definitions": {
            "Pet": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "collar": {"$ref": "#/definitions/Collar"}
                }
            },
            "Collar": {"type": "object"}
        }
    });
    fs::write(
        base_path.join("models.json"),
        serde_json::to_string_pretty(&models).unwrap(),
    )
    .unwrap();

    // Broken content for the error demonstration
    fs::write(base_path.join("broken.bin"), "{\"unterminated\": ").unwrap();

    println!("   ✅ Created example files:");
    println!("   - openapi.yaml (root document)");
    println!("   - models.json (referenced definitions)");
    println!("   - broken.bin (for error demonstration)");
}

async fn demo_graph_loading(base_path: &Path) -> LoaderResult<()> {
    println!("\n🔗 Loading a Document Graph");
    println!("===========================");

    let loader = SchemaLoader::new()?;
    let root_path = base_path.join("openapi.yaml");
    let schemas = loader.load(root_path.to_str().unwrap()).await?;

    println!("\n📚 Loaded {} documents:", schemas.len());
    for id in schemas.keys() {
        println!("   - {}", id);
    }

    // References now carry their final namespaced form
    for (id, document) in &schemas {
        let rendered = serde_json::to_string(document).unwrap();
        if rendered.contains("external[") {
            println!("\n   🔎 {} holds rewritten external references", id);
        }
    }

    Ok(())
}

async fn demo_in_memory_loading() -> LoaderResult<()> {
    println!("\n🧠 Loading an In-Memory Document");
    println!("================================");

    let loader = SchemaLoader::new()?;
    let schemas = loader
        .load_value(json!({
            "components": {"schemas": {"Pet": {"type": "object"}}},
            "use": {"$ref": "#/components/schemas/Pet"}
        }))
        .await?;

    for (id, document) in &schemas {
        println!("   {}: use -> {}", id, document["use"]["$ref"]);
    }

    Ok(())
}

async fn demo_error_handling(base_path: &Path) {
    println!("\n⚠️  Error Handling");
    println!("==================");

    let loader = match SchemaLoader::new() {
        Ok(loader) => loader,
        Err(e) => {
            println!("   ❌ Could not build loader: {}", e);
            return;
        }
    };

    // Missing document
    println!("\n📁 Testing missing document...");
    match loader
        .load(base_path.join("nonexistent.yaml").to_str().unwrap())
        .await
    {
        Ok(_) => println!("   ❌ Expected not-found error but got success"),
        Err(e) => println!("   ✅ Caught error: {}", e),
    }

    // Undeclared, unparseable content
    println!("\n🔴 Testing unknown format...");
    match loader
        .load(base_path.join("broken.bin").to_str().unwrap())
        .await
    {
        Ok(_) => println!("   ❌ Expected format error but got success"),
        Err(e) => println!("   ✅ Caught error: {}", e),
    }

    // Relative reference without a base location
    println!("\n🧭 Testing unresolvable reference...");
    match loader
        .load_value(json!({"a": {"$ref": "./pet.yaml#/Pet"}}))
        .await
    {
        Ok(_) => println!("   ❌ Expected unresolvable reference but got success"),
        Err(e) => println!("   ✅ Caught error: {}", e),
    }
}

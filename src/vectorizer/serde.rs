use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize};

use crate::vectorizer::{corpus::{Corpus, DocumentIndex}, document::Document};

/// DocumentIndexのデシリアライズ用のデータ構造
/// 保存されるのはドキュメントだけです。辞書と文書頻度は派生データなので、
/// `add` を順に再実行して再構築します。
/// `into_document_index`メソッドを使用して、`DocumentIndex`に変換できます。
#[derive(Debug, Deserialize)]
pub struct DocumentIndexData<D> {
    /// ドキュメント (追加順)
    pub documents: Vec<D>,
}

impl<D> DocumentIndexData<D>
where
    D: Document,
{
    /// `DocumentIndexData`から`DocumentIndex`に変換します。
    pub fn into_document_index(self) -> DocumentIndex<D> {
        DocumentIndex::from_documents(self.documents)
    }
}

impl<D> Serialize for DocumentIndex<D>
where
    D: Serialize,
{
    /// DocumentIndexをシリアライズします
    /// 派生データ (辞書、文書頻度) は除外されます。
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DocumentIndex", 1)?;
        state.serialize_field("documents", &self.docs)?;
        state.end()
    }
}

impl<'de, D> Deserialize<'de> for DocumentIndex<D>
where
    D: Document + Deserialize<'de>,
{
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        DocumentIndexData::<D>::deserialize(deserializer).map(DocumentIndexData::into_document_index)
    }
}

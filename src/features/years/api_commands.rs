/// API Server経由での年度操作
use crate::features::years::models::{CreateYearDto, ProfitResponse, Year};
use crate::shared::api_client::{ApiClient, DataResponse, MaybeWrapped, MessageResponse};
use crate::shared::errors::AppResult;
use log::{error, info};

impl ApiClient {
    /// 年度一覧を取得する
    ///
    /// ホーム画面では年度一覧を常に表示するため、失敗時は空の一覧を返す
    pub async fn get_years(&self) -> AppResult<Vec<Year>> {
        match self.get::<DataResponse<Vec<Year>>>("/years").await {
            Ok(response) => {
                info!("年度一覧取得成功: count={}", response.data.len());
                Ok(response.data)
            }
            Err(e) => {
                error!("年度一覧の取得に失敗しました。空の一覧を返します: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// 年度を作成する
    pub async fn create_year(&self, dto: &CreateYearDto) -> AppResult<Year> {
        let response: MaybeWrapped<Year> = self.post("/years", dto).await?;
        let year = response.into_inner();

        info!("年度作成成功: year_id={}, year={}", year.id, year.year);
        Ok(year)
    }

    /// 年度を削除する
    pub async fn delete_year(&self, year_id: i64) -> AppResult<()> {
        let _response: MessageResponse = self.delete(&format!("/years/{year_id}")).await?;

        info!("年度削除成功: year_id={year_id}");
        Ok(())
    }

    /// 年度の利益（サーバー集計）を取得する
    pub async fn get_profit(&self, year_id: i64) -> AppResult<f64> {
        let response: ProfitResponse = self.get(&format!("/years/{year_id}/profit")).await?;
        Ok(response.profit)
    }
}
